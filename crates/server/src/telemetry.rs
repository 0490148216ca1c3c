use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SERVICE_NAME: &str = "fruit-union";

/// Kept alive for the process lifetime so batched logs keep flushing.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the tonic exporters. `connect_lazy()` spawns onto the
/// current Tokio runtime, which is not always entered when the serve
/// closure runs.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Endpoint and credentials shared by the span and log exporters.
struct ExportTarget {
    endpoint: String,
    ingestion_key: Option<String>,
}

impl ExportTarget {
    fn from_env() -> Option<Self> {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;
        let ingestion_key = std::env::var("SIGNOZ_INGESTION_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        Some(Self {
            endpoint,
            ingestion_key,
        })
    }

    /// TLS with native roots for `https://` endpoints, plus the ingestion
    /// key as gRPC metadata when one is configured.
    fn apply<B: WithTonicConfig + WithExportConfig>(&self, builder: B) -> B {
        let mut builder = builder.with_endpoint(&self.endpoint);
        if self.endpoint.starts_with("https://") {
            builder = builder.with_tls_config(
                opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new()
                    .with_native_roots(),
            );
        }
        if let Some(key) = self.ingestion_key.as_deref() {
            match key.parse() {
                Ok(value) => {
                    let mut metadata =
                        opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
                    metadata.insert("signoz-ingestion-key", value);
                    builder = builder.with_metadata(metadata);
                }
                Err(_) => eprintln!("SIGNOZ_INGESTION_KEY is not valid metadata, sending without it"),
            }
        }
        builder
    }
}

/// Register the OTLP tracer provider and bridge the `log` crate to OTLP logs.
///
/// Dioxus owns the `tracing` subscriber, so this only wires exporters.
/// Nothing happens unless `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address, e.g. `http://localhost:4317`
///   - `OTEL_SERVICE_NAME`: defaults to `fruit-union`
///   - `SIGNOZ_INGESTION_KEY`: optional cloud access token
///   - `DEPLOY_ENV`: defaults to `development`
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(target) = ExportTarget::from_env() else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    if OTEL_RUNTIME.get().is_none() {
        match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
        {
            Ok(rt) => {
                let _ = OTEL_RUNTIME.set(rt);
            }
            Err(e) => {
                eprintln!("could not start the telemetry runtime, skipping OTLP telemetry: {e}");
                return;
            }
        }
    }
    let Some(rt) = OTEL_RUNTIME.get() else {
        return;
    };
    let _guard = rt.enter();

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let span_exporter =
        match target.apply(opentelemetry_otlp::SpanExporter::builder().with_tonic()).build() {
            Ok(exporter) => exporter,
            Err(e) => {
                eprintln!("could not build the OTLP span exporter: {e}");
                return;
            }
        };
    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(tracer_provider);

    let log_exporter =
        match target.apply(opentelemetry_otlp::LogExporter::builder().with_tonic()).build() {
            Ok(exporter) => exporter,
            Err(e) => {
                eprintln!("could not build the OTLP log exporter, exporting traces only: {e}");
                return;
            }
        };
    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => eprintln!("log bridge skipped, a logger is already installed"),
    }

    let mode = if target.ingestion_key.is_some() { "cloud" } else { "local" };
    eprintln!(
        "telemetry initialized v{APP_VERSION}, exporting to {} ({mode})",
        target.endpoint
    );
}

/// Span name for a request path: UUID segments become `{id}` so every
/// customer's deliveries share one route, e.g.
/// `/api/customers/{id}/deliveries`.
pub fn route_template(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if uuid::Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that opens a server span per HTTP request, tagged with the
/// method, route, request id, response status and signed-in user.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(DEFAULT_SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let route = route_template(&path);

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path),
            KeyValue::new("http.route", route.clone()),
            KeyValue::new("http.user_agent", header("user-agent")),
            KeyValue::new("http.request_id", header("x-request-id")),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => attributes.extend([
                KeyValue::new("user.id", claims.sub.to_string()),
                KeyValue::new("session.id", claims.sid.clone()),
                KeyValue::new("auth.status", "authenticated"),
            ]),
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{method} {route}"))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_become_placeholders() {
        assert_eq!(
            route_template("/api/customers/7f6c1b2a-52c4-4d7e-9d0e-3c1a2b3c4d5e/deliveries"),
            "/api/customers/{id}/deliveries"
        );
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(route_template("/api/admin/stats"), "/api/admin/stats");
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn non_uuid_ids_are_kept() {
        assert_eq!(route_template("/dashboard/42"), "/dashboard/42");
    }
}
