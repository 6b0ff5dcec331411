//! Route and road-snap collaborator contracts.
//!
//! # Pluggability
//!
//! The engine never talks to a directions or roads API directly.  It goes
//! through the [`RouteProvider`] and [`RoadSnapProvider`] traits, so
//! deployments can plug in a network client and tests can plug in
//! deterministic fakes.
//!
//! # Fail-soft wrappers
//!
//! Callers should use [`resolve_route`] and [`snap_or_identity`] rather than
//! calling the traits directly.  Both bound the call with a timeout and
//! convert every failure into the documented fallback:
//!
//! | Wrapper              | On error or timeout                    |
//! |----------------------|----------------------------------------|
//! | [`resolve_route`]    | empty [`RoutePolyline`] (no deviation) |
//! | [`snap_or_identity`] | the unmodified input point             |
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync` and return `Send` futures so a
//! single provider can serve fixes from many tasks.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use tg_core::GeoPoint;

use crate::route::{DEFAULT_PRECISION, decode_polyline};
use crate::{ProviderError, RouteEndpoints, RoutePolyline};

/// Default bound on a single collaborator call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

// ── Traits ────────────────────────────────────────────────────────────────────

/// Resolves an origin/destination pair into a planned path.
pub trait RouteProvider: Send + Sync {
    /// Ordered `(lat, lon)` vertices from `origin` to `destination`.
    fn resolve(
        &self,
        origin:      GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = Result<Vec<GeoPoint>, ProviderError>> + Send;
}

/// Moves a raw fix onto the nearest road.
pub trait RoadSnapProvider: Send + Sync {
    fn snap(&self, point: GeoPoint) -> impl Future<Output = Result<GeoPoint, ProviderError>> + Send;
}

// ── Fail-soft wrappers ────────────────────────────────────────────────────────

/// Resolve `endpoints` through `provider`, bounded by `timeout`.
///
/// Any error, timeout, or out-of-range vertex yields an empty route, which
/// disables route-deviation checking for the run.
pub async fn resolve_route<P: RouteProvider>(
    provider:  &P,
    endpoints: RouteEndpoints,
    timeout:   Duration,
) -> RoutePolyline {
    let outcome = match tokio::time::timeout(
        timeout,
        provider.resolve(endpoints.origin, endpoints.destination),
    )
    .await
    {
        Ok(result) => result,
        Err(_)     => Err(ProviderError::Timeout(timeout)),
    };

    match outcome {
        Ok(points) if points.iter().all(|p| p.is_valid()) => {
            debug!(vertices = points.len(), "route resolved");
            RoutePolyline::new(points)
        }
        Ok(_) => {
            warn!("route provider returned out-of-range vertices; route deviation disabled");
            RoutePolyline::empty()
        }
        Err(e) => {
            warn!(error = %e, "route resolution failed; route deviation disabled");
            RoutePolyline::empty()
        }
    }
}

/// Snap `point` through `provider`, bounded by `timeout`.
///
/// Returns `point` unchanged on any error, timeout, or invalid snap result.
pub async fn snap_or_identity<S: RoadSnapProvider>(
    provider: &S,
    point:    GeoPoint,
    timeout:  Duration,
) -> GeoPoint {
    match tokio::time::timeout(timeout, provider.snap(point)).await {
        Ok(Ok(snapped)) if snapped.is_valid() => snapped,
        Ok(Ok(snapped)) => {
            warn!(%point, %snapped, "road snap returned an invalid point; using raw fix");
            point
        }
        Ok(Err(e)) => {
            warn!(%point, error = %e, "road snap failed; using raw fix");
            point
        }
        Err(_) => {
            warn!(%point, ?timeout, "road snap timed out; using raw fix");
            point
        }
    }
}

// ── Built-in providers ────────────────────────────────────────────────────────

/// Snap provider that returns its input.  Use when no roads service exists.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdentitySnap;

impl RoadSnapProvider for IdentitySnap {
    async fn snap(&self, point: GeoPoint) -> Result<GeoPoint, ProviderError> {
        Ok(point)
    }
}

/// Route provider that never has a route.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoRoute;

impl RouteProvider for NoRoute {
    async fn resolve(&self, _origin: GeoPoint, _destination: GeoPoint) -> Result<Vec<GeoPoint>, ProviderError> {
        Ok(Vec::new())
    }
}

/// Route provider with a fixed, pre-computed polyline.
#[derive(Clone, Debug, Default)]
pub struct StaticRoute(pub Vec<GeoPoint>);

impl RouteProvider for StaticRoute {
    async fn resolve(&self, _origin: GeoPoint, _destination: GeoPoint) -> Result<Vec<GeoPoint>, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Route provider returning the direct segment from origin to destination.
///
/// An offline stand-in for a directions service.
#[derive(Copy, Clone, Debug, Default)]
pub struct StraightLineRoute;

impl RouteProvider for StraightLineRoute {
    async fn resolve(&self, origin: GeoPoint, destination: GeoPoint) -> Result<Vec<GeoPoint>, ProviderError> {
        Ok(vec![origin, destination])
    }
}

/// Route provider backed by an encoded polyline, e.g. an overview polyline
/// fetched ahead of time from a directions service.
#[derive(Clone, Debug)]
pub struct EncodedRoute {
    pub encoded:   String,
    pub precision: u32,
}

impl EncodedRoute {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self { encoded: encoded.into(), precision: DEFAULT_PRECISION }
    }
}

impl RouteProvider for EncodedRoute {
    async fn resolve(&self, _origin: GeoPoint, _destination: GeoPoint) -> Result<Vec<GeoPoint>, ProviderError> {
        Ok(decode_polyline(&self.encoded, self.precision)?)
    }
}
