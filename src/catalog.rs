//! Product catalog served to the dashboard.
//!
//! Labels only: the demand model was trained on market features, not on the
//! product identity, so the selected product tags a simulation in reports
//! and never enters the feature row.

/// The products available in the pricing simulator, in dataset order.
pub const PRODUCT_CATALOG: [&str; 50] = [
    "Smartphone",
    "Wireless Earbuds",
    "Bluetooth Speaker",
    "Gaming Laptop",
    "Smartwatch",
    "Noise Cancelling Headphones",
    "Mechanical Keyboard",
    "4K Monitor",
    "Portable SSD",
    "Fitness Tracker",
    "Running Shoes",
    "Leather Wallet",
    "Backpack",
    "Water Bottle",
    "Sunglasses",
    "Winter Jacket",
    "Sneakers",
    "Yoga Mat",
    "Hiking Boots",
    "Electric Toothbrush",
    "Air Purifier",
    "Espresso Machine",
    "Robot Vacuum",
    "LED Desk Lamp",
    "Instant Pot",
    "Hair Dryer",
    "Standing Desk",
    "Ergonomic Chair",
    "Monitor Arm",
    "Wireless Charger",
    "iPad",
    "Laptop Stand",
    "Graphic Tablet",
    "Tripod",
    "Camera Drone",
    "Smart Thermostat",
    "Video Doorbell",
    "Bluetooth Tracker",
    "Streaming Stick",
    "Projector",
    "Camping Tent",
    "Sleeping Bag",
    "Power Bank",
    "Phone Gimbal",
    "Smart Scale",
    "Microwave",
    "Dish Rack",
    "Dehumidifier",
    "Pet Feeder",
    "Electric Kettle",
];
