use shared::metrics_defs::{MetricDef, MetricType};

pub const REQUESTS: MetricDef = MetricDef {
    name: "gateway.requests",
    metric_type: MetricType::Counter,
    description: "Incoming API requests. Tagged with endpoint.",
};

pub const UPSTREAM_REQUESTS: MetricDef = MetricDef {
    name: "gateway.upstream.requests",
    metric_type: MetricType::Counter,
    description: "Calls relayed to the upstream API",
};

pub const UPSTREAM_FAILURES: MetricDef = MetricDef {
    name: "gateway.upstream.failures",
    metric_type: MetricType::Counter,
    description: "Relayed calls that failed with a network error or an unexpected status",
};

pub const ALL_METRICS: &[MetricDef] = &[REQUESTS, UPSTREAM_REQUESTS, UPSTREAM_FAILURES];
