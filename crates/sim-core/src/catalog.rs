//! Built-in catalogs of factors, events, customer segments and product lines.
//!
//! Event impacts here are display values; the simulator draws its own
//! impact per run.

use serde::Serialize;

/// A macro or micro factor entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FactorInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

/// A market event entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EventInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub impact: f64,
    pub category: &'static str,
}

const fn factor(id: &'static str, name: &'static str, category: &'static str) -> FactorInfo {
    FactorInfo { id, name, category }
}

const fn event(
    id: &'static str,
    name: &'static str,
    impact: f64,
    category: &'static str,
) -> EventInfo {
    EventInfo {
        id,
        name,
        impact,
        category,
    }
}

pub const MACRO_FACTORS: &[FactorInfo] = &[
    factor("m1", "Economic Growth Rate", "Economy"),
    factor("m2", "Inflation Rate", "Economy"),
    factor("m3", "Interest Rates", "Economy"),
    factor("m4", "Consumer Confidence", "Economy"),
    factor("m5", "GDP Growth", "Economy"),
    factor("m6", "Political Stability", "Politics"),
    factor("m7", "Regulatory Changes", "Politics"),
    factor("m8", "Trade Policies", "Politics"),
    factor("m9", "Environmental Regulations", "Politics"),
    factor("m10", "Technological Advancements", "Technology"),
    factor("m11", "Digital Transformation", "Technology"),
    factor("m12", "Infrastructure Development", "Technology"),
    factor("m13", "Climate Change Impact", "Environment"),
    factor("m14", "Sustainability Trends", "Environment"),
    factor("m15", "Global Supply Chain", "Global"),
];

pub const MICRO_FACTORS: &[FactorInfo] = &[
    factor("mi1", "Competitor Pricing", "Competition"),
    factor("mi2", "Market Share Changes", "Competition"),
    factor("mi3", "New Entrants", "Competition"),
    factor("mi4", "Customer Preferences", "Customer"),
    factor("mi5", "Brand Loyalty", "Customer"),
    factor("mi6", "Customer Satisfaction", "Customer"),
    factor("mi7", "Product Quality", "Product"),
    factor("mi8", "Innovation Rate", "Product"),
    factor("mi9", "Supply Chain Efficiency", "Operations"),
    factor("mi10", "Production Costs", "Operations"),
    factor("mi11", "Employee Satisfaction", "HR"),
    factor("mi12", "Marketing Effectiveness", "Marketing"),
    factor("mi13", "Sales Performance", "Sales"),
    factor("mi14", "Distribution Channels", "Distribution"),
    factor("mi15", "Digital Presence", "Digital"),
];

pub const EVENTS: &[EventInfo] = &[
    event("e1", "Economic Recession", -0.15, "Economy"),
    event("e2", "Stock Market Crash", -0.12, "Economy"),
    event("e3", "Currency Devaluation", -0.08, "Economy"),
    event("e4", "Economic Boom", 0.18, "Economy"),
    event("e5", "Major Competitor Bankruptcy", 0.22, "Market"),
    event("e6", "New Market Entrant", -0.10, "Market"),
    event("e7", "Industry Consolidation", 0.15, "Market"),
    event("e8", "Breakthrough Innovation", 0.25, "Technology"),
    event("e9", "Cybersecurity Breach", -0.20, "Technology"),
    event("e10", "Digital Transformation Success", 0.18, "Technology"),
    event("e11", "Viral Social Media Campaign", 0.30, "Social"),
    event("e12", "Brand Crisis", -0.25, "Social"),
    event("e13", "Celebrity Endorsement", 0.20, "Social"),
    event("e14", "Natural Disaster", -0.35, "Environment"),
    event("e15", "Supply Chain Disruption", -0.28, "Environment"),
    event("e16", "Sustainability Award", 0.15, "Environment"),
    event("e17", "Favorable Regulation", 0.20, "Politics"),
    event("e18", "Trade War", -0.25, "Politics"),
    event("e19", "Government Incentives", 0.18, "Politics"),
    event("e20", "Customer Loyalty Program Success", 0.22, "Customer"),
    event("e21", "Major Customer Loss", -0.30, "Customer"),
    event("e22", "Positive Customer Reviews", 0.12, "Customer"),
];

/// Micro segments offered under every customer macro segment.
pub const MICRO_SEGMENTS: &[&str] = &[
    "SENIOR_BUDGET_CONSCIOUS",
    "YOUNG_AFFLUENT_TECH_SAVVY",
    "GENERAL_AUDIENCE",
];

/// Customer macro segments.
pub const CUSTOMER_SEGMENTS: &[&str] = &["At-risk", "Potential", "Good", "VIP"];

pub const PRODUCT_LINES: &[&str] = &[
    "Niche Products",
    "Popular Products",
    "Standard Products",
    "High Margin Products",
];

pub fn macro_factor(id: &str) -> Option<&'static FactorInfo> {
    MACRO_FACTORS.iter().find(|f| f.id == id)
}

pub fn micro_factor(id: &str) -> Option<&'static FactorInfo> {
    MICRO_FACTORS.iter().find(|f| f.id == id)
}

pub fn event_info(id: &str) -> Option<&'static EventInfo> {
    EVENTS.iter().find(|e| e.id == id)
}

/// Whether `macro_segment` / `micro_segment` is a known customer pair.
pub fn is_customer_segment(macro_segment: &str, micro_segment: &str) -> bool {
    CUSTOMER_SEGMENTS.contains(&macro_segment) && MICRO_SEGMENTS.contains(&micro_segment)
}

pub fn is_product_line(name: &str) -> bool {
    PRODUCT_LINES.contains(&name)
}
