#[tokio::main]
async fn main() {
    if let Err(e) = resort_booking_backend::run().await {
        eprintln!("Fatal: {}", e);
        std::process::exit(1);
    }
}
