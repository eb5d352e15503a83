use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        corpus_path: get_env_or_default("CORPUS_PATH", "completeworks.txt"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
        host: get_env_or_default("HOST", "0.0.0.0"),
        port: get_env_or_default("PORT", "3001"),
        ngram_window: get_env_parsed("NGRAM_WINDOW", 5),
        stop_words: get_env_flag("SEARCH_STOP_WORDS"),
        stemming: get_env_flag("SEARCH_STEMMING"),
    }
});

pub struct Config {
    pub corpus_path: String,
    pub static_dir: String,
    pub host: String,
    pub port: String,
    /// Longest phrase (in terms) indexed for adjacency scoring.
    pub ngram_window: usize,
    pub stop_words: bool,
    pub stemming: bool,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn get_env_flag(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
