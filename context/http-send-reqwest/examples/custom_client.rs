use anyhow::Result;
use bytes::Bytes;
use csgen_core::Context;
use csgen_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("csgen-example/1.0")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8080/client/api?command=listCapabilities".to_string());
    println!("GET {url}");

    let req = http::Request::get(url).body(Bytes::new())?;
    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("status: {}", resp.status());
            println!("body: {}", String::from_utf8_lossy(resp.body()));
        }
        Err(err) => eprintln!("request failed: {err}"),
    }

    Ok(())
}
