pub mod leetcode_client;

pub use leetcode_client::LeetCodeClient;
