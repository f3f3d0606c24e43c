//! Tab example - open a page, drive it, read it back.
//!
//! Needs a browser started with `--remote-debugging-port=9222`.

use devtools::DevTools;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = DevTools::new()?;

    let tab = client.new_tab().await?;
    println!("Opened tab {}", tab.descriptor().id);

    tab.navigate("data:text/html,Hello%2C%20World!").await?;
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    println!("outer HTML: {}", tab.outer_html().await?);
    println!("1 + 1 = {}", tab.evaluate("1 + 1").await?);

    tab.close_target().await?;
    tab.close().await?;

    Ok(())
}
