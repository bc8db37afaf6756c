//! # Routing Endpoint
//!
//! Answers `getRoute` on the routing channel: validates the four coordinates,
//! asks the native [`DirectionsService`] for a walking route and flattens the
//! first route's path into `[[lat, lon], ...]`.
//!
//! The native call runs on its own task so the channel keeps accepting calls
//! while the engine works. Native failures are surfaced once, unretried.

use crate::arguments::decode_arguments;
use crate::error::{CallError, MISSING_ROUTING_ARGUMENTS};
use crate::transport::{MethodCallHandler, Reply};
use bridge_traits::{
    Coordinate, DirectionsRequest, DirectionsResponse, DirectionsService, MethodCall,
};
use core_async::task;
use core_runtime::logging::coarsen_coordinate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Method answered by [`RoutingEndpoint`].
pub const GET_ROUTE: &str = "getRoute";

/// Validated `getRoute` payload.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
}

impl RouteRequest {
    /// Decode from the call's argument map.
    pub fn from_arguments(arguments: &Value) -> Result<Self, CallError> {
        decode_arguments(arguments, MISSING_ROUTING_ARGUMENTS)
    }

    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.start_lat, self.start_lon)
    }

    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.end_lat, self.end_lon)
    }

    /// Pedestrian directions request from start to end.
    pub fn to_directions_request(&self) -> DirectionsRequest {
        DirectionsRequest::walking(self.start(), self.end())
    }
}

/// One path point, serialized as `[latitude, longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint(pub f64, pub f64);

impl RoutePoint {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

impl From<Coordinate> for RoutePoint {
    fn from(coordinate: Coordinate) -> Self {
        RoutePoint(coordinate.latitude, coordinate.longitude)
    }
}

/// Ordered walking path. Empty when no route was found.
pub type RouteResult = Vec<RoutePoint>;

/// Flatten the first route of `response` into path points, in traversal
/// order. Later candidate routes are ignored.
pub fn flatten_route(response: &DirectionsResponse) -> RouteResult {
    response
        .first_route()
        .map(|route| {
            route
                .polyline
                .coordinates()
                .iter()
                .copied()
                .map(RoutePoint::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Reply payload for a route: an array of 2-element arrays.
pub fn route_to_value(points: &[RoutePoint]) -> Value {
    Value::Array(
        points
            .iter()
            .map(|point| serde_json::json!([point.latitude(), point.longitude()]))
            .collect(),
    )
}

/// Call handler for the routing channel.
#[derive(Clone)]
pub struct RoutingEndpoint {
    directions: Arc<dyn DirectionsService>,
}

impl RoutingEndpoint {
    pub fn new(directions: Arc<dyn DirectionsService>) -> Self {
        Self { directions }
    }

    /// Ask the native engine for a walking route and flatten it.
    ///
    /// # Errors
    ///
    /// [`CallError::NativeRoutingError`] with the engine's description.
    pub async fn get_route(&self, request: RouteRequest) -> Result<RouteResult, CallError> {
        let response = self
            .directions
            .calculate(request.to_directions_request())
            .await
            .map_err(|err| CallError::NativeRoutingError(err.description()))?;

        if response.routes.len() > 1 {
            debug!(
                candidates = response.routes.len(),
                "Engine returned several routes; using the first"
            );
        }

        Ok(flatten_route(&response))
    }

    fn dispatch_get_route(&self, arguments: &Value, reply: Reply) {
        let request = match RouteRequest::from_arguments(arguments) {
            Ok(request) => request,
            Err(err) => {
                warn!(call_id = reply.call_id(), "Rejected getRoute: {}", err);
                reply.error(err);
                return;
            }
        };

        debug!(
            start_lat = coarsen_coordinate(request.start_lat),
            start_lon = coarsen_coordinate(request.start_lon),
            end_lat = coarsen_coordinate(request.end_lat),
            end_lon = coarsen_coordinate(request.end_lon),
            "Requesting walking directions"
        );

        let endpoint = self.clone();
        task::spawn(async move {
            match endpoint.get_route(request).await {
                Ok(points) => {
                    info!(
                        call_id = reply.call_id(),
                        points = points.len(),
                        "Walking route resolved"
                    );
                    reply.success(route_to_value(&points));
                }
                Err(err) => {
                    warn!(call_id = reply.call_id(), error = %err, "Directions request failed");
                    reply.error(err);
                }
            }
        });
    }
}

#[async_trait::async_trait]
impl MethodCallHandler for RoutingEndpoint {
    #[instrument(name = "routing", skip_all, fields(method = %call.method))]
    async fn on_method_call(&self, call: MethodCall, reply: Reply) {
        match call.method.as_str() {
            GET_ROUTE => self.dispatch_get_route(&call.arguments, reply),
            other => {
                debug!(method = %other, "Unsupported routing method");
                reply.not_implemented();
            }
        }
    }
}
