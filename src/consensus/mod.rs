pub mod resolver;

pub use resolver::LongestChainResolver;
