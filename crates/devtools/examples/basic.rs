//! Basic example - discovery plus the browser-wide channel.
//!
//! Needs a browser started with `--remote-debugging-port=9222`.

use devtools::DevTools;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = DevTools::new()?;

    let version = client.version().await?;
    println!("Browser: {} (protocol {})", version.browser, version.protocol_version);

    let browser = client.browser().await?;
    println!("Connected to {}", browser.version().web_socket_debugger_url);

    for target in browser.targets().await? {
        println!("  [{}] {} - {}", target.target_type, target.title, target.url);
    }

    // Watch raw events for a moment.
    let mut events = browser.session().events();
    let watcher = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {}", event.method);
        }
    });

    browser
        .session()
        .invoke("Target", "setDiscoverTargets", Some(serde_json::json!({"discover": true})))
        .await?;
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    browser.close().await?;
    watcher.abort();
    println!("Disconnected");

    Ok(())
}
