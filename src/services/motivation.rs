// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Motivational quotes and fitness facts.

use crate::models::{MotivationalContent, Quote};
use rand::seq::IndexedRandom;

const QUOTES: &[(&str, &str)] = &[("The only bad workout is the one that didn't happen.", "Unknown")];

const FACTS: &[&str] = &[
    "Fact: Regular exercise has been shown to improve mood and reduce feelings of anxiety and depression.",
];

/// Draw one quote and one fact from the content pools.
///
/// `topic` is accepted for callers that pass one but does not affect the draw.
pub fn get_motivational_content(topic: Option<&str>) -> MotivationalContent {
    tracing::debug!(topic = topic.unwrap_or("general_fitness"), "Drawing motivational content");

    let mut rng = rand::rng();
    // Pools are non-empty constants.
    let (quote, author) = QUOTES.choose(&mut rng).copied().unwrap_or(QUOTES[0]);
    let fact = FACTS.choose(&mut rng).copied().unwrap_or(FACTS[0]);

    MotivationalContent {
        quote: Quote {
            quote: quote.to_string(),
            author: author.to_string(),
        },
        fact: fact.to_string(),
    }
}
