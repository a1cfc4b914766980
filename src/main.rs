#[tokio::main]
async fn main() {
  if let Err(e) = golf_tracker_lib::run().await {
    eprintln!("golf-tracker: {}", e);
    std::process::exit(1);
  }
}
