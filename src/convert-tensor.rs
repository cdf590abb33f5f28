// Copyright 2019-present, Laurent Mazare.
// Copyright 2019-present Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

extern crate tch;

use clap::Parser;
use imdb_sentiment::gru::keras_to_torch_layout;
use imdb_sentiment::SentimentError;
use std::path::PathBuf;
use tracing::info;

/// Converts an `.npz` export of the sentiment model weights to the `.ot` format loaded by the classifier.
///
/// Arrays must be named after the classifier variables: `embedding.weight`,
/// `gru.weight_ih_l0`, `gru.weight_hh_l0`, `gru.bias_ih_l0`, `gru.bias_hh_l0`,
/// `classifier.weight` and `classifier.bias`.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Source weights (.npz)
    source: PathBuf,
    /// Destination weights (.ot)
    destination: PathBuf,
    /// Arrays are in the Keras layout (transposed kernels, GRU gates ordered update, reset, candidate)
    #[arg(long)]
    keras: bool,
}

pub fn main() -> Result<(), SentimentError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let tensors = tch::Tensor::read_npz(&args.source)?;
    let tensors = if args.keras {
        tensors
            .iter()
            .map(|(name, tensor)| Ok((name.clone(), keras_to_torch_layout(name, tensor)?)))
            .collect::<Result<Vec<_>, SentimentError>>()?
    } else {
        tensors
    };
    for (name, tensor) in tensors.iter() {
        info!(name = name.as_str(), shape = ?tensor.size(), "converted");
    }
    tch::Tensor::save_multi(&tensors, &args.destination)?;

    Ok(())
}
