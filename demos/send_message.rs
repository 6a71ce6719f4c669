use std::io;

use smsgate::{Config, Identity, Message, TransportProxy};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // SMSGATE_CONFIG holds the gateway settings as JSON, e.g.
    // {"host":"gw.example.com","port":443,"path":"/send","username":"u","password":"p","sender":"ACME"}
    let config: Config = serde_json::from_str(&required("SMSGATE_CONFIG")?)?;
    let phone = required("SMSGATE_PHONE")?;
    let text = std::env::var("SMSGATE_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsgate example.".to_owned());

    let proxy = TransportProxy::builder(config)
        .user_agent("smsgate-demo")
        .build()?;
    let message = Message::new(1_u64, Identity::new("phone", phone)).with_content(text);

    let result = proxy.transmit(&message).await;
    match result.error() {
        None => println!("delivered to {}", proxy.endpoint()),
        Some(err) => println!("failed: code={:?} message={}", err.code, err.message),
    }

    Ok(())
}
