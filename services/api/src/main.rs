use munda_ai_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("munda-ai error: {err}");
        std::process::exit(1);
    }
}
