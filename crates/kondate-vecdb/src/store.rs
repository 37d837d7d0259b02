//! # Vector File Persistence
//!
//! Reads and writes the precomputed embedding artifact as a single
//! safetensors file holding two tensors: `ids` (i64, shape `[n]`) and
//! `embeddings` (f32, shape `[n, d]`). The file is produced offline by
//! the catalog build tool and read once at startup; the running service
//! never writes it.

use std::path::Path;

use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use tracing::info;

use crate::error::{Result, VecdbError};
use crate::index::VectorIndex;

const IDS_TENSOR: &str = "ids";
const EMBEDDINGS_TENSOR: &str = "embeddings";

/// Write the index contents to `path` as a safetensors file.
///
/// # Errors
/// Returns [`VecdbError::Io`] on filesystem failures and
/// [`VecdbError::Format`] if the tensors cannot be serialized.
pub fn save(index: &VectorIndex, path: &Path) -> Result<()> {
    let mut id_bytes = Vec::with_capacity(index.len() * 8);
    let mut vector_bytes = Vec::with_capacity(index.len() * index.dimension() * 4);
    for (id, row) in index.entries() {
        id_bytes.extend_from_slice(&id.to_le_bytes());
        for value in row {
            vector_bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    let ids_view = TensorView::new(Dtype::I64, vec![index.len()], &id_bytes)
        .map_err(|e| VecdbError::Format(e.to_string()))?;
    let embeddings_view = TensorView::new(
        Dtype::F32,
        vec![index.len(), index.dimension()],
        &vector_bytes,
    )
    .map_err(|e| VecdbError::Format(e.to_string()))?;

    safetensors::serialize_to_file(
        vec![(IDS_TENSOR, ids_view), (EMBEDDINGS_TENSOR, embeddings_view)],
        &None,
        path,
    )
    .map_err(|e| VecdbError::Format(e.to_string()))?;

    info!(
        path = %path.display(),
        vectors = index.len(),
        dimension = index.dimension(),
        "saved vector file"
    );
    Ok(())
}

/// Load a [`VectorIndex`] from a safetensors file written by [`save`].
///
/// # Errors
/// Returns [`VecdbError::Io`] if the file cannot be read and
/// [`VecdbError::Format`] if a tensor is missing, has the wrong dtype,
/// or the id count disagrees with the embedding row count.
pub fn load(path: &Path) -> Result<VectorIndex> {
    let buffer = std::fs::read(path)?;
    let tensors =
        SafeTensors::deserialize(&buffer).map_err(|e| VecdbError::Format(e.to_string()))?;

    let ids_view = tensors
        .tensor(IDS_TENSOR)
        .map_err(|e| VecdbError::Format(e.to_string()))?;
    let embeddings_view = tensors
        .tensor(EMBEDDINGS_TENSOR)
        .map_err(|e| VecdbError::Format(e.to_string()))?;

    if ids_view.dtype() != Dtype::I64 {
        return Err(VecdbError::Format(format!(
            "ids tensor must be i64, got {:?}",
            ids_view.dtype()
        )));
    }
    if embeddings_view.dtype() != Dtype::F32 {
        return Err(VecdbError::Format(format!(
            "embeddings tensor must be f32, got {:?}",
            embeddings_view.dtype()
        )));
    }

    let &[count, dimension] = embeddings_view.shape() else {
        return Err(VecdbError::Format(format!(
            "embeddings tensor must be 2-dimensional, got shape {:?}",
            embeddings_view.shape()
        )));
    };

    if dimension == 0 {
        return Err(VecdbError::ZeroDimension);
    }

    let ids: Vec<i64> = ids_view
        .data()
        .chunks_exact(8)
        .map(|chunk| i64::from_le_bytes(chunk.try_into().unwrap()))
        .collect();
    if ids.len() != count {
        return Err(VecdbError::Format(format!(
            "id count {} does not match embedding row count {count}",
            ids.len()
        )));
    }

    let values: Vec<f32> = embeddings_view
        .data()
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect();

    let entries = ids
        .into_iter()
        .zip(values.chunks_exact(dimension))
        .map(|(id, row)| (id, row.to_vec()));
    let index = VectorIndex::build(entries, dimension)?;

    info!(
        path = %path.display(),
        vectors = index.len(),
        dimension = index.dimension(),
        "loaded vector file"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::l2_normalize;

    fn unit(components: &[f32]) -> Vec<f32> {
        let mut v = components.to_vec();
        l2_normalize(&mut v);
        v
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.safetensors");

        let entries = vec![
            (11, unit(&[1.0, 0.0, 0.0])),
            (22, unit(&[0.0, 1.0, 0.0])),
            (33, unit(&[0.5, 0.5, 0.5])),
        ];
        let index = VectorIndex::build(entries, 3).unwrap();
        save(&index, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dimension(), 3);

        let original: Vec<(i64, Vec<f32>)> =
            index.entries().map(|(id, row)| (id, row.to_vec())).collect();
        let restored: Vec<(i64, Vec<f32>)> =
            loaded.entries().map(|(id, row)| (id, row.to_vec())).collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("absent.safetensors"));
        assert!(matches!(result, Err(VecdbError::Io(_))));
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.safetensors");
        std::fs::write(&path, b"not a safetensors file").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(VecdbError::Format(_))));
    }

    #[test]
    fn roundtrip_preserves_query_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.safetensors");

        let entries = vec![
            (1, unit(&[0.9, 0.1])),
            (2, unit(&[0.1, 0.9])),
        ];
        let index = VectorIndex::build(entries, 2).unwrap();
        save(&index, &path).unwrap();
        let loaded = load(&path).unwrap();

        let query = unit(&[1.0, 0.0]);
        assert_eq!(
            index.query(&query, 2).unwrap(),
            loaded.query(&query, 2).unwrap()
        );
    }
}
