#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ride_booking_backend::run().await
}
