// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Criterion configured from `GALENE_BENCH_*` variables.
///
/// `GALENE_PROFILE_FREQ=0` turns the flamegraph profiler off.
pub fn criterion() -> Criterion {
    let frequency = env_parse("GALENE_PROFILE_FREQ", 100i32).clamp(0, 1000);
    let sample_size = env_parse("GALENE_BENCH_SAMPLE_SIZE", 40usize).clamp(10, 200);
    let warmup = Duration::from_secs(env_parse("GALENE_BENCH_WARMUP_SECS", 2u64).clamp(1, 60));
    let measurement =
        Duration::from_secs(env_parse("GALENE_BENCH_MEASUREMENT_SECS", 4u64).clamp(1, 120));

    let criterion = Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement);
    if frequency == 0 {
        return criterion;
    }
    criterion.with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
