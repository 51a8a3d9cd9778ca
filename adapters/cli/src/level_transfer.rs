//! Shareable single-line level codes for clipboard transfer.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use beacon_maze_core::LevelParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CODE_DOMAIN: &str = "maze-level";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded level payload.
pub(crate) const CODE_HEADER: &str = "maze-level:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Level parameters captured as a transferable code.
///
/// Levels are fully determined by their parameters, so the code carries no
/// wall data: whoever decodes it regenerates the identical maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LevelCode {
    params: LevelParams,
}

impl LevelCode {
    /// Captures the provided parameters for encoding.
    pub(crate) const fn from_params(params: LevelParams) -> Self {
        Self { params }
    }

    /// Parameters carried by the code.
    pub(crate) const fn params(&self) -> LevelParams {
        self.params
    }

    /// Encodes the level into a single-line string suitable for sharing.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableCode {
            cell_pitch: self.params.cell_pitch,
            wall_thickness: self.params.wall_thickness,
            seed: self.params.seed,
        };
        let json = serde_json::to_vec(&payload).expect("level code serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!(
            "{CODE_HEADER}:{}x{}:{encoded}",
            self.params.columns, self.params.rows
        )
    }

    /// Decodes a level code from its string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LevelTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LevelTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LevelTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LevelTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LevelTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LevelTransferError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(LevelTransferError::TrailingSegments);
        }

        if domain != CODE_DOMAIN {
            return Err(LevelTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != CODE_VERSION {
            return Err(LevelTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        let decoded: SerializableCode = serde_json::from_slice(&bytes)?;

        Ok(Self {
            params: LevelParams::new(
                columns,
                rows,
                decoded.cell_pitch,
                decoded.wall_thickness,
                decoded.seed,
            ),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableCode {
    cell_pitch: f32,
    wall_thickness: f32,
    seed: u64,
}

/// Errors that can occur while decoding level transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LevelTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("level code was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded level.
    #[error("level code is missing the prefix")]
    MissingPrefix,
    /// The encoded level did not contain a version segment.
    #[error("level code is missing the version")]
    MissingVersion,
    /// The encoded level did not include grid dimensions.
    #[error("level code is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded level did not include the payload segment.
    #[error("level code is missing the payload")]
    MissingPayload,
    /// The encoded level carried extra segments after the payload.
    #[error("level code has trailing segments after the payload")]
    TrailingSegments,
    /// The encoded level used an unexpected prefix segment.
    #[error("level prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded level used an unsupported version identifier.
    #[error("level version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded level.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode level payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse level payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LevelTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| LevelTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| LevelTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| LevelTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(LevelTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((columns, rows))
}
