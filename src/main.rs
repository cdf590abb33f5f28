// Copyright 2019 Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use imdb_sentiment::server::{serve, ServerConfig};
use imdb_sentiment::{Config, SentimentError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// IMDB movie review sentiment classifier
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Server configuration file (artifact locations, listening address)
    #[arg(default_value = "imdb-sentiment.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), SentimentError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_file(&args.config)?;
    serve(config).await
}
