use smsgate::{Config, MessageTransport, TransportProxy};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let raw = std::env::var("SMSGATE_CONFIG")?;
    let config: Config = serde_json::from_str(&raw)?;
    let transport: Box<dyn MessageTransport> = Box::new(TransportProxy::new(config)?);

    println!("health: {:?}", transport.health_check());
    println!("messages per second: {}", transport.messages_per_second());
    println!("try send count: {:?}", transport.try_send_count());

    Ok(())
}
