use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::registry::{self, columns};

/// Compression options for Parquet spot tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Configuration for writing spot tables to Parquet
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of spots per group)
    pub row_group_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Enable BYTE_STREAM_SPLIT encoding for the floating-point feature columns
    pub use_byte_stream_split: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: 100_000,
            write_statistics: true,
            use_byte_stream_split: true,
        }
    }
}

impl StorageConfig {
    /// Default configuration with a specific ZSTD level
    pub fn with_zstd_level(level: i32) -> Self {
        Self {
            compression: CompressionType::Zstd(level),
            ..Self::default()
        }
    }

    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // Frame index and label repeat across many spots
        for col in [columns::T_STAMP, columns::LABEL] {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), true);
        }

        let float_columns = registry::spot_fields()
            .iter()
            .map(|f| f.column)
            .filter(|c| *c != columns::T_STAMP && *c != columns::SPOT_ID);
        for col in float_columns {
            let path = ColumnPath::new(vec![col.to_string()]);
            builder = builder.set_column_dictionary_enabled(path.clone(), false);
            if self.use_byte_stream_split {
                builder = builder.set_column_encoding(path, Encoding::BYTE_STREAM_SPLIT);
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}
