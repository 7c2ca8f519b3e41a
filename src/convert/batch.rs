// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parallel conversion and decoding of independent ensembles.
//!
//! Ensembles share no state, so each one is handled by a rayon worker. Output
//! order always matches input order and each item carries its own result.

use rayon::prelude::*;

use crate::core::{ConversionOptions, DecodeOptions, Pd0Error, Result};
use crate::native::NativeEnsemble;
use crate::pd0::Ensemble;

use super::Pd0Converter;

fn build_pool(num_threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let mut builder =
        rayon::ThreadPoolBuilder::new().thread_name(|index| format!("pd0-worker-{}", index));
    if let Some(n) = num_threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| Pd0Error::invalid_options(format!("Failed to create thread pool: {e}")))
}

/// Convert many native ensembles in parallel.
pub fn convert_all(
    natives: &[NativeEnsemble],
    options: &ConversionOptions,
) -> Result<Vec<Result<Ensemble>>> {
    let pool = build_pool(options.num_threads)?;
    let converter = Pd0Converter::new(options.clone());

    let results: Vec<Result<Ensemble>> = pool.install(|| {
        natives
            .par_iter()
            .map(|native| converter.convert(native))
            .collect()
    });

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(
        total = results.len(),
        failed,
        transform = options.transform.as_str(),
        "Batch conversion finished"
    );
    Ok(results)
}

/// Decode many ensemble buffers in parallel.
pub fn decode_all<B>(buffers: &[B], options: &DecodeOptions) -> Result<Vec<Result<Ensemble>>>
where
    B: AsRef<[u8]> + Sync,
{
    let pool = build_pool(options.num_threads)?;

    let results: Vec<Result<Ensemble>> = pool.install(|| {
        buffers
            .par_iter()
            .map(|buffer| Ensemble::decode_with(buffer.as_ref(), options))
            .collect()
    });

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(total = results.len(), failed, "Batch decode finished");
    Ok(results)
}
