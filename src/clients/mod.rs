pub mod play_client;

pub use play_client::PlayClient;
