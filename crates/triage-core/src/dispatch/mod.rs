//! Conversational routing.
//!
//! A turn is routed through a fixed, ordered chain; the first route that
//! produces a reply wins. The chain always ends in [`Route::Fallback`], which
//! never declines.
//!
//! ```text
//! SingleSymptom → Diagnosis → Greeting → CannedKeyword → CompoundRule → HealthConcern → Fallback
//! ```

pub mod keywords;

use serde::{Deserialize, Serialize};

use crate::config::{CannedResponse, DispatchTables, RenderOptions, TriageConfig};
use crate::matcher::Matcher;
use crate::models::Diagnosis;
use crate::render;

/// A branch of the dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Short message naming exactly one canned keyword
    SingleSymptom,
    /// Full symptom extraction and diagnosis
    Diagnosis,
    /// Greeting or courtesy phrase
    Greeting,
    /// Any message containing a canned keyword
    CannedKeyword,
    /// Fixed multi-phrase rule (persistent headache)
    CompoundRule,
    /// Generic health wording without recognizable symptoms
    HealthConcern,
    /// Introductory message
    Fallback,
}

/// Evaluation order of the dispatch chain.
pub const ROUTE_ORDER: [Route; 7] = [
    Route::SingleSymptom,
    Route::Diagnosis,
    Route::Greeting,
    Route::CannedKeyword,
    Route::CompoundRule,
    Route::HealthConcern,
    Route::Fallback,
];

/// Reply produced by a route.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub route: Route,
    pub text: String,
    /// Present only for [`Route::Diagnosis`]
    pub diagnosis: Option<Diagnosis>,
}

impl DispatchOutcome {
    fn text(route: Route, text: String) -> Self {
        Self {
            route,
            text,
            diagnosis: None,
        }
    }
}

/// Routes a message through the dispatch chain.
pub struct Dispatcher {
    tables: DispatchTables,
    render: RenderOptions,
}

impl Dispatcher {
    /// Keywords are lowercased once here; messages are lowercased per turn.
    pub fn new(config: &TriageConfig) -> Self {
        let mut tables = config.dispatch.clone();
        for canned in &mut tables.canned {
            canned.keyword = canned.keyword.to_lowercase();
        }
        for greeting in &mut tables.greetings {
            greeting.keyword = greeting.keyword.to_lowercase();
        }
        lowercase_all(&mut tables.health_keywords);
        lowercase_all(&mut tables.compound.required);
        lowercase_all(&mut tables.compound.any_of);

        Self {
            tables,
            render: config.render.clone(),
        }
    }

    /// The routes in evaluation order.
    pub fn chain(&self) -> &'static [Route] {
        &ROUTE_ORDER
    }

    /// Route one message. Never fails: the fallback always answers.
    pub fn dispatch(&self, matcher: &Matcher, message: &str, username: &str) -> DispatchOutcome {
        let message = message.to_lowercase();
        self.chain()
            .iter()
            .find_map(|&route| self.try_route(route, matcher, &message, username))
            .unwrap_or_else(|| DispatchOutcome::text(Route::Fallback, self.tables.default_reply.clone()))
    }

    /// Evaluate a single route against a lowercased message.
    pub fn try_route(
        &self,
        route: Route,
        matcher: &Matcher,
        message: &str,
        username: &str,
    ) -> Option<DispatchOutcome> {
        match route {
            Route::SingleSymptom => self
                .single_symptom(message)
                .map(|canned| DispatchOutcome::text(route, render::canned_markup(canned))),
            Route::Diagnosis => matcher.assess(message).map(|diagnosis| DispatchOutcome {
                route,
                text: render::diagnosis_markup(&diagnosis, &self.render),
                diagnosis: Some(diagnosis),
            }),
            Route::Greeting => self
                .tables
                .greetings
                .iter()
                .find(|g| message.contains(g.keyword.as_str()))
                .map(|g| DispatchOutcome::text(route, render::personalize(&g.reply, username))),
            Route::CannedKeyword => self
                .tables
                .canned
                .iter()
                .find(|c| message.contains(c.keyword.as_str()))
                .map(|canned| DispatchOutcome::text(route, render::canned_markup(canned))),
            Route::CompoundRule => {
                let rule = &self.tables.compound;
                (keywords::contains_all(message, &rule.required)
                    && keywords::contains_any(message, &rule.any_of))
                .then(|| DispatchOutcome::text(route, rule.response.clone()))
            }
            Route::HealthConcern => keywords::contains_any(message, &self.tables.health_keywords)
                .then(|| DispatchOutcome::text(route, self.tables.health_concern_reply.clone())),
            Route::Fallback => Some(DispatchOutcome::text(route, self.tables.default_reply.clone())),
        }
    }

    /// First canned keyword mentioned exactly once in a short message.
    fn single_symptom(&self, message: &str) -> Option<&CannedResponse> {
        self.tables.canned.iter().find(|c| {
            keywords::is_single_mention(message, &c.keyword, self.tables.shortcut_max_words)
        })
    }
}

fn lowercase_all(items: &mut [String]) {
    for item in items {
        *item = item.to_lowercase();
    }
}
