//! Native directions contract.
//!
//! The bridge never computes routes itself. Hosts wrap their platform routing
//! engine (MapKit on iOS, a directions SDK on Android) behind
//! [`DirectionsService`] and hand back every candidate route as an ordered
//! polyline.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Mode of travel requested from the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportType {
    #[default]
    Walking,
    Automobile,
    Transit,
    Any,
}

/// Directions query submitted to the native engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub source: Coordinate,
    pub destination: Coordinate,
    pub transport_type: TransportType,
}

impl DirectionsRequest {
    /// Pedestrian request between two coordinates.
    pub fn walking(source: Coordinate, destination: Coordinate) -> Self {
        Self {
            source,
            destination,
            transport_type: TransportType::Walking,
        }
    }
}

/// Path geometry of a route. Points are stored in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Points in traversal order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.points
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One candidate route. Only its path geometry crosses the bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub polyline: Polyline,
}

impl Route {
    pub fn new(polyline: Polyline) -> Self {
        Self { polyline }
    }
}

/// Successful engine answer. Routes keep the engine's own ordering; an empty
/// list means no route was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionsResponse {
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The engine's preferred route.
    pub fn first_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}

/// Platform routing engine.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::directions::{DirectionsRequest, DirectionsResponse, DirectionsService};
/// use bridge_traits::error::Result;
/// use async_trait::async_trait;
///
/// struct MapKitDirections;
///
/// #[async_trait]
/// impl DirectionsService for MapKitDirections {
///     async fn calculate(&self, request: DirectionsRequest) -> Result<DirectionsResponse> {
///         // Forward to MKDirections and await its completion handler
///         todo!()
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait DirectionsService: Send + Sync {
    /// Calculate candidate routes. Must not block the calling thread; errors
    /// should carry the engine's description in [`BridgeError::Native`].
    ///
    /// [`BridgeError::Native`]: crate::error::BridgeError::Native
    async fn calculate(&self, request: DirectionsRequest) -> Result<DirectionsResponse>;
}
