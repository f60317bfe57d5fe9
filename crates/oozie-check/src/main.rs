#[tokio::main]
async fn main() {
    let severity = oozie_check::run().await;
    std::process::exit(severity.exit_code());
}
