#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = billed_lib::run().await {
        eprintln!("{}", e.details());
        std::process::exit(1);
    }
}
