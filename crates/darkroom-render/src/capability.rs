//! Execution capability detection.
//!
//! Backends are probed once per process, highest tier first, and the
//! winning tier is memoized. Environment variables allow vetoing the
//! upper tiers without recompiling, which is useful when chasing a
//! tier-specific difference:
//!
//! - `DARKROOM_NO_COMPILED` disables the parallel compiled tier.
//! - `DARKROOM_NO_SPECIALIZE` disables the specialized table tier.

use std::sync::OnceLock;

use tracing::debug;

use crate::executor::PixelExecutor;
use crate::executor::scalar::ScalarExecutor;
#[cfg(feature = "simd")]
use crate::executor::vector::VectorExecutor;
#[cfg(feature = "parallel")]
use crate::executor::compiled::CompiledExecutor;
#[cfg(feature = "specialize")]
use crate::executor::specialized::SpecializedExecutor;

/// Execution tier for the per-pixel adjustment kernels.
///
/// Ordered from fastest to slowest. [`Capability::Scalar`] is always
/// available and serves as the final fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Row-parallel execution over all cores, SIMD inner loop.
    #[cfg(feature = "parallel")]
    Compiled,
    /// Tone curve baked into a runtime lookup table per resolve.
    #[cfg(feature = "specialize")]
    Specialized,
    /// SIMD lanes on a single thread.
    #[cfg(feature = "simd")]
    Vectorized,
    /// Plain per-pixel loop. Always available.
    Scalar,
}

impl Capability {
    /// All capabilities compiled into this build, fastest first.
    pub const ALL: &'static [Capability] = &[
        #[cfg(feature = "parallel")]
        Capability::Compiled,
        #[cfg(feature = "specialize")]
        Capability::Specialized,
        #[cfg(feature = "simd")]
        Capability::Vectorized,
        Capability::Scalar,
    ];

    /// Human-readable tier name.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "parallel")]
            Capability::Compiled => "compiled",
            #[cfg(feature = "specialize")]
            Capability::Specialized => "specialized",
            #[cfg(feature = "simd")]
            Capability::Vectorized => "vectorized",
            Capability::Scalar => "scalar",
        }
    }

    /// Whether this tier is usable in the current process.
    ///
    /// Feature-compiled tiers can still be vetoed at runtime through
    /// environment variables.
    pub fn is_available(&self) -> bool {
        match self {
            #[cfg(feature = "parallel")]
            Capability::Compiled => !env_veto("DARKROOM_NO_COMPILED"),
            #[cfg(feature = "specialize")]
            Capability::Specialized => !env_veto("DARKROOM_NO_SPECIALIZE"),
            #[cfg(feature = "simd")]
            Capability::Vectorized => true,
            Capability::Scalar => true,
        }
    }

    /// The next tier down, or `None` below [`Capability::Scalar`].
    pub fn downgrade(&self) -> Option<Capability> {
        let pos = Capability::ALL.iter().position(|c| c == self)?;
        Capability::ALL.get(pos + 1).copied()
    }

    /// Construct the executor implementing this tier.
    pub fn executor(&self) -> Box<dyn PixelExecutor> {
        match self {
            #[cfg(feature = "parallel")]
            Capability::Compiled => Box::new(CompiledExecutor),
            #[cfg(feature = "specialize")]
            Capability::Specialized => Box::new(SpecializedExecutor),
            #[cfg(feature = "simd")]
            Capability::Vectorized => Box::new(VectorExecutor),
            Capability::Scalar => Box::new(ScalarExecutor),
        }
    }

    /// Probe for the best available capability, memoized per process.
    pub fn probe() -> Capability {
        static PROBED: OnceLock<Capability> = OnceLock::new();
        *PROBED.get_or_init(|| {
            let cap = Capability::probe_uncached();
            debug!(tier = cap.name(), "selected execution capability");
            cap
        })
    }

    /// Run the probe without consulting or updating the memoized
    /// result. Used by tests that toggle the environment vetoes.
    pub fn probe_uncached() -> Capability {
        for cap in Capability::ALL {
            if cap.is_available() {
                return *cap;
            }
        }
        Capability::Scalar
    }
}

fn env_veto(var: &str) -> bool {
    std::env::var_os(var).is_some_and(|v| !v.is_empty() && v != "0")
}
