#[actix_web::main]
async fn main() -> std::io::Result<()> {
    fleetops_lib::run().await
}
