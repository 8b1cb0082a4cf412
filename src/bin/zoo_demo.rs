//! Minimal demo client: create a node, read it back, print what came over
//! the stream.

use roost::client::Client;
use roost::proto::RoostRequest;
use roost::Result;

const SERVER_ENDPOINT: &str = "http://127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut client = Client::builder(SERVER_ENDPOINT).build().await?;
    println!("Connected as {}", client.client_id());

    let requests = vec![
        RoostRequest::create("/zoo", "Secrets hahahahaha!!", &[]),
        RoostRequest::get_data("/zoo", false),
    ];
    for request in requests {
        client.send(request).await?;
    }
    client.close();

    while let Some(response) = client.recv().await? {
        println!("{response:?}");
    }
    Ok(())
}
