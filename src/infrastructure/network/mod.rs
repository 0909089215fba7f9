pub mod board_api;

pub use board_api::HttpBoardClient;
