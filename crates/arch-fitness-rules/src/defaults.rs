//! Built-in policy data besides the category lists.

/// Top-level modules that hold shared infrastructure rather than a business
/// capability. They are exempt from domain-module boundaries on both sides.
pub const NON_DOMAIN_MODULES: &[&str] = &[
    "shared-kernel",
    "shared",
    "utils",
    "health",
    "middleware",
    "database",
    "test-utils",
    "audit-log",
];

/// Files another domain module may import: aggregators, ports and module
/// composition files. Anchored to a suffix or a whole directory segment.
pub const GATEWAY_SURFACE: &str =
    r"(\.aggregator\.ts$|/aggregators/|\.port\.ts$|/ports/|\.module\.ts$)";

/// Nodes the orphan rule never reports.
pub const ORPHAN_EXEMPTIONS: &[&str] = &[
    "/migrations/",
    "/__specs__/",
    "/__tests__/",
    r"\.(spec|test)\.[cm]?[jt]sx?$",
    "^{root}/test-utils/",
    r"\.d\.ts$",
    r"^{root}/database/data-source\.ts$",
];
