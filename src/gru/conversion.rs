use crate::common::error::SentimentError;
use tch::Tensor;

/// Converts a Keras weight to the layout of the matching `GruSentimentClassifier` variable.
///
/// Keras kernels are stored as (*input*, *output*) while torch stores (*output*, *input*), and the
/// Keras GRU concatenates its gates as (update, reset, candidate) where torch expects
/// (reset, update, new). Variables are identified by their store name:
/// - `gru.weight_ih_l*`, `gru.weight_hh_l*`: transposed, then gates reordered
/// - `gru.bias_ih_l*`, `gru.bias_hh_l*`: gates reordered
/// - `classifier.weight`: transposed
/// - anything else (embedding, classifier bias) is returned unchanged
pub fn keras_to_torch_layout(name: &str, tensor: &Tensor) -> Result<Tensor, SentimentError> {
    let variable = name.rsplit('.').next().unwrap_or(name);
    if name.starts_with("gru.") && variable.starts_with("weight_") {
        reorder_gates(&transpose(name, tensor)?)
    } else if name.starts_with("gru.") && variable.starts_with("bias_") {
        reorder_gates(tensor)
    } else if name == "classifier.weight" {
        transpose(name, tensor)
    } else {
        Ok(tensor.shallow_clone())
    }
}

fn transpose(name: &str, tensor: &Tensor) -> Result<Tensor, SentimentError> {
    if tensor.dim() != 2 {
        return Err(SentimentError::InvalidConfigurationError(format!(
            "{} should be a matrix, got shape {:?}",
            name,
            tensor.size()
        )));
    }
    Ok(tensor.transpose(0, 1).contiguous())
}

fn reorder_gates(tensor: &Tensor) -> Result<Tensor, SentimentError> {
    let rows = tensor.size()[0];
    if rows % 3 != 0 {
        return Err(SentimentError::InvalidConfigurationError(format!(
            "GRU weight first dimension ({}) is not a multiple of 3",
            rows
        )));
    }
    let gates = tensor.chunk(3, 0);
    Ok(Tensor::cat(&[&gates[1], &gates[0], &gates[2]], 0))
}
