mod candidate;
mod data;
mod error;
mod fitness;
mod generator;
mod operators;
mod sampling;
mod scheduler;
mod server;
mod time;
mod vacancy;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    server::run_server().await;
}
