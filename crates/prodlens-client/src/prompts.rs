//! Prompt text sent to the LLM provider.

pub(crate) const COMPARE_SYSTEM: &str = "You are a product comparison expert. Provide detailed, \
accurate comparisons between products in a structured JSON format. Include specific metrics, \
pros/cons, and target user information.";

pub(crate) const FIND_SYSTEM: &str = "You are a product recommendation expert. Find and recommend \
products based on user criteria. Return results in a structured JSON array format with detailed \
product information.";

pub(crate) const UPDATES_SYSTEM: &str = "You are a product news and updates expert. Provide the \
latest information about products in a specific category. Return results in a structured JSON \
array format.";

pub(crate) fn compare_prompt(product1: &str, product2: &str) -> String {
    format!(
        "Compare these products in detail: \"{product1}\" and \"{product2}\". Include: price \
ranges, key features, performance metrics, pros and cons, and which types of users each product \
is best for. Format the response as JSON with the following structure: {{ \"product1\": {{ \
\"name\", \"price\", \"rating\", \"keyFeatures\", \"pros\", \"cons\", \"idealFor\" }}, \
\"product2\": {{ same structure }}, \"comparisonMetrics\": [{{ \"name\", \"product1Score\", \
\"product2Score\" }}] }}"
    )
}

pub(crate) fn find_prompt(criteria: &str) -> String {
    format!(
        "Find products that match these criteria: {criteria}. For each product, provide the \
name, a brief description, key features, approximate price range, brand, category, rating (1-5), \
release date, and pros/cons. Limit to 5 best matches. Format the response as a JSON array with \
objects having the following properties: id, name, description, price, features (array), \
category, brand, rating, releaseDate, imageUrl."
    )
}

pub(crate) fn updates_prompt(category: &str) -> String {
    format!(
        "Find the latest product updates, news, and trends for the {category} category. Include \
new releases, price changes, comparison studies, and buying guides. For each update, provide a \
title, brief description, date, category, image URL, source, and link. Format the response as a \
JSON array with objects having the following properties: id, title, description, date, category, \
imageUrl, source, url."
    )
}
