//! # MiniLM Sentence Embedder
//!
//! Wraps the pretrained `all-MiniLM-L6-v2` encoder (BERT architecture,
//! 384-dim mean-pooled output) using candle for inference without
//! external runtimes. The model is loaded once at startup and is
//! immutable afterwards, so a single instance is safely shared by all
//! concurrent requests.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer as HfTokenizer;

use crate::embedding::TextEmbedder;
use crate::error::{KondateError, Result};
use kondate_vecdb::l2_normalize;

/// Sentence embedder backed by a local MiniLM checkpoint.
pub struct MiniLmEmbedder {
    tokenizer: HfTokenizer,
    model: BertModel,
    device: Device,
    dimension: usize,
}

impl MiniLmEmbedder {
    /// Load the encoder from a directory containing `tokenizer.json`,
    /// `config.json` and `model.safetensors`.
    ///
    /// # Errors
    ///
    /// Returns `KondateError::ModelLoadError` if any artifact is missing
    /// or malformed.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let device = Device::Cpu;

        let tokenizer_path = model_dir.join("tokenizer.json");
        if !tokenizer_path.exists() {
            return Err(KondateError::ModelLoadError(format!(
                "tokenizer not found at {}",
                tokenizer_path.display()
            )));
        }
        let tokenizer = HfTokenizer::from_file(&tokenizer_path)
            .map_err(|e| KondateError::ModelLoadError(e.to_string()))?;

        let config_path = model_dir.join("config.json");
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| KondateError::ModelLoadError(format!("failed to read config: {e}")))?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| KondateError::ModelLoadError(format!("failed to parse config: {e}")))?;

        let weights_path = model_dir.join("model.safetensors");
        if !weights_path.exists() {
            return Err(KondateError::ModelLoadError(format!(
                "weights not found at {}",
                weights_path.display()
            )));
        }
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)
        }
        .map_err(|e| KondateError::ModelLoadError(e.to_string()))?;

        let dimension = config.hidden_size;
        let model = BertModel::load(vb, &config)
            .map_err(|e| KondateError::ModelLoadError(e.to_string()))?;

        Ok(Self {
            tokenizer,
            model,
            device,
            dimension,
        })
    }
}

impl TextEmbedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| KondateError::InferenceError(format!("tokenize error: {e}")))?;

        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            // Cannot happen with special tokens enabled, but degenerate
            // input must still yield a valid-dimensionality vector.
            return Ok(vec![0.0; self.dimension]);
        }

        let input_ids = Tensor::new(tokens, &self.device)
            .map_err(|e| KondateError::InferenceError(e.to_string()))?
            .unsqueeze(0) // add batch dimension
            .map_err(|e| KondateError::InferenceError(e.to_string()))?;
        let token_type_ids = input_ids
            .zeros_like()
            .map_err(|e| KondateError::InferenceError(e.to_string()))?;
        let attention_mask = input_ids
            .ones_like()
            .map_err(|e| KondateError::InferenceError(e.to_string()))?;

        // Shape of hidden states is [1, seq_len, hidden]
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| KondateError::InferenceError(e.to_string()))?;

        // Mean pooling over the token axis, matching the
        // sentence-transformers export of this checkpoint.
        let pooled = hidden
            .mean(1)
            .map_err(|e| KondateError::InferenceError(e.to_string()))?
            .squeeze(0)
            .map_err(|e| KondateError::InferenceError(e.to_string()))?;

        let mut vector: Vec<f32> = pooled
            .to_vec1()
            .map_err(|e| KondateError::InferenceError(e.to_string()))?;
        l2_normalize(&mut vector);
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
