mod client;
pub use client::LibraryClient;
