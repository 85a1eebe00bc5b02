//! Canned provider answers for offline use and tests.
//!
//! Values are shaped like real provider JSON so they pass through the same
//! transformer as live data.

use serde_json::{json, Value};

/// A comparison of two phones; the requested names are echoed back.
#[must_use]
pub fn comparison(product1: &str, product2: &str) -> Value {
    json!({
        "product1": {
            "name": product1,
            "price": "$899-$1099",
            "rating": 4.5,
            "keyFeatures": [
                "6.1 inch OLED display",
                "Dual camera system",
                "All-day battery life",
                "Water resistant"
            ],
            "pros": ["Excellent camera quality", "Fast performance", "Premium build quality"],
            "cons": ["Expensive", "No headphone jack", "Charger sold separately"],
            "idealFor": "Users who want a premium smartphone experience and are invested in the ecosystem"
        },
        "product2": {
            "name": product2,
            "price": "$799-$999",
            "rating": 4.3,
            "keyFeatures": [
                "6.4 inch AMOLED display",
                "Triple camera system",
                "Fast charging",
                "Customizable interface"
            ],
            "pros": ["Large, vibrant display", "Excellent value", "Expandable storage"],
            "cons": [
                "Camera quality inconsistent",
                "Software updates can be slow",
                "Average battery life"
            ],
            "idealFor": "Users who want more customization options and features at a slightly lower price point"
        },
        "comparisonMetrics": [
            {"name": "Display Quality", "product1Score": 9, "product2Score": 8},
            {"name": "Camera", "product1Score": 9, "product2Score": 7},
            {"name": "Battery Life", "product1Score": 8, "product2Score": 7},
            {"name": "Performance", "product1Score": 9, "product2Score": 8},
            {"name": "Value", "product1Score": 7, "product2Score": 9}
        ]
    })
}

/// Four products spanning the default catalog. The criteria are ignored;
/// callers narrow the list with [`prodlens_core::ProductFilters`].
#[must_use]
pub fn products() -> Vec<Value> {
    vec![
        json!({
            "id": "1",
            "name": "Premium Smartphone X",
            "description": "The latest flagship smartphone with cutting-edge features",
            "price": "$899-$1099",
            "features": ["6.1 inch OLED", "Triple camera system", "5G capable", "All-day battery"],
            "category": "Electronics",
            "brand": "TechBrand",
            "rating": 4.5,
            "releaseDate": "2025-01-15",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=Smartphone+X"
        }),
        json!({
            "id": "2",
            "name": "UltraBook Pro",
            "description": "Lightweight laptop with powerful performance",
            "price": "$1299-$1899",
            "features": ["13.3 inch Retina display", "16GB RAM", "512GB SSD", "10-hour battery life"],
            "category": "Electronics",
            "brand": "CompuTech",
            "rating": 4.7,
            "releaseDate": "2025-02-10",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=UltraBook+Pro"
        }),
        json!({
            "id": "3",
            "name": "SoundMax Wireless Headphones",
            "description": "Premium noise-cancelling wireless headphones",
            "price": "$249-$299",
            "features": [
                "Active noise cancellation",
                "30-hour battery",
                "Premium sound quality",
                "Comfortable fit"
            ],
            "category": "Audio",
            "brand": "SoundMax",
            "rating": 4.4,
            "releaseDate": "2025-03-01",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=SoundMax"
        }),
        json!({
            "id": "4",
            "name": "FitTrack Smart Watch",
            "description": "Advanced fitness tracking with smartwatch capabilities",
            "price": "$199-$249",
            "features": ["Heart rate monitoring", "Sleep tracking", "GPS", "5-day battery life"],
            "category": "Wearables",
            "brand": "FitTech",
            "rating": 4.2,
            "releaseDate": "2025-01-20",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=FitTrack"
        }),
    ]
}

/// Recent news items. Every category gets the same feed.
#[must_use]
pub fn updates() -> Vec<Value> {
    vec![
        json!({
            "id": "update1",
            "productName": "Premium Smartphone X Pro",
            "updateType": "New Release",
            "date": "2025-04-10",
            "description": "The latest flagship smartphone with improved camera system and faster processor",
            "highlights": [
                "Enhanced triple camera with 108MP main sensor",
                "Next-gen processor with improved AI capabilities",
                "Increased battery capacity of 4500mAh",
                "New titanium frame design"
            ],
            "category": "Smartphones",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=Smartphone+X+Pro"
        }),
        json!({
            "id": "update2",
            "productName": "UltraBook Pro",
            "updateType": "Major Update",
            "date": "2025-03-25",
            "description": "Spring update adds new features and performance improvements",
            "highlights": [
                "New AI-powered productivity tools",
                "Improved battery efficiency",
                "Enhanced security features",
                "New color options available"
            ],
            "category": "Laptops",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=UltraBook+Pro"
        }),
        json!({
            "id": "update3",
            "productName": "SoundMax Wireless Headphones 2",
            "updateType": "New Release",
            "date": "2025-04-01",
            "description": "Next generation of premium noise-cancelling headphones",
            "highlights": [
                "Improved noise cancellation algorithm",
                "Extended battery life up to 40 hours",
                "New transparency mode for ambient awareness",
                "Enhanced comfort with redesigned ear cups"
            ],
            "category": "Audio",
            "imageUrl": "https://placehold.co/300x300/e6f2ff/0284c7?text=SoundMax+2"
        }),
    ]
}
