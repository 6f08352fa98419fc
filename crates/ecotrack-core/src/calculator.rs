//! Emission factor tables and the per-category CO₂ formulas.
//!
//! Every option is a closed enum, so a deserialized [`Activity`] can always
//! be priced. Results are in kilograms and are left unrounded; rounding
//! happens once, when an entry is built (see [`round_kg`]).

use ecotrack_types::models::Category;
use serde::{Deserialize, Serialize};

/// Share of the renewable portion of grid power that counts as emission-free.
const RENEWABLE_CREDIT: f64 = 0.9;

/// Round a kilogram amount to two decimal places.
pub fn round_kg(kg: f64) -> f64 {
    (kg * 100.0).round() / 100.0
}

/// Clamp a user-supplied magnitude to a usable non-negative number.
fn magnitude(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 { x } else { 0.0 }
}

/// A priced activity, tagged by its calculator category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Activity {
    Transportation(Trip),
    Diet(Meal),
    Electricity(EnergyUse),
    Other(OtherActivity),
}

impl Activity {
    /// Emissions in kg CO₂. Never negative.
    pub fn co2_kg(&self) -> f64 {
        let kg = match self {
            Self::Transportation(trip) => trip.co2_kg(),
            Self::Diet(meal) => meal.co2_kg(),
            Self::Electricity(usage) => usage.co2_kg(),
            Self::Other(other) => other.co2_kg(),
        };
        kg.max(0.0)
    }
}

// -- Transportation --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    GasolineCar,
    Suv,
    ElectricCar,
    Motorcycle,
    Bus,
    Train,
    Metro,
    DomesticFlight,
    InternationalFlight,
    Bicycle,
    Walking,
}

impl TransportMode {
    /// kg CO₂ per km.
    pub fn factor(self) -> f64 {
        match self {
            Self::GasolineCar => 0.231,
            Self::Suv => 0.32,
            Self::ElectricCar => 0.05,
            Self::Motorcycle => 0.18,
            Self::Bus => 0.089,
            Self::Train => 0.041,
            Self::Metro => 0.028,
            Self::DomesticFlight => 0.254,
            Self::InternationalFlight => 0.273,
            Self::Bicycle | Self::Walking => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GasolineCar => "Car (Gasoline)",
            Self::Suv => "SUV (Gasoline)",
            Self::ElectricCar => "Electric Car",
            Self::Motorcycle => "Motorcycle",
            Self::Bus => "Bus",
            Self::Train => "Train",
            Self::Metro => "Metro/Subway",
            Self::DomesticFlight => "Domestic Flight",
            Self::InternationalFlight => "International Flight",
            Self::Bicycle => "Bicycle",
            Self::Walking => "Walking",
        }
    }

    /// Human-powered modes are never split between passengers.
    pub fn is_shareable(self) -> bool {
        !matches!(self, Self::Bicycle | Self::Walking)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelEfficiency {
    #[default]
    Average,
    High,
    Low,
}

impl FuelEfficiency {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Average => 1.0,
            Self::High => 0.8,
            Self::Low => 1.3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Average => "Average",
            Self::High => "High Efficiency",
            Self::Low => "Low Efficiency",
        }
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub mode: TransportMode,
    pub distance_km: f64,
    #[serde(default = "one")]
    pub passengers: u32,
    #[serde(default)]
    pub efficiency: FuelEfficiency,
}

impl Trip {
    pub fn co2_kg(&self) -> f64 {
        let mut per_km = self.mode.factor() * self.efficiency.multiplier();
        if self.passengers > 1 && self.mode.is_shareable() {
            per_km /= f64::from(self.passengers);
        }
        per_km * magnitude(self.distance_km)
    }
}

// -- Diet --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodItem {
    Beef,
    Lamb,
    Pork,
    Chicken,
    FarmedFish,
    Seafood,
    Milk,
    Cheese,
    Eggs,
    Bread,
    Rice,
    Potatoes,
    Vegetables,
    Fruits,
    Legumes,
    Nuts,
    Coffee,
    Beer,
    Wine,
}

impl FoodItem {
    /// kg CO₂ per kg (or per litre for drinks).
    pub fn factor(self) -> f64 {
        match self {
            Self::Beef => 27.0,
            Self::Lamb => 39.2,
            Self::Pork => 12.1,
            Self::Chicken => 6.9,
            Self::FarmedFish => 13.6,
            Self::Seafood => 18.2,
            Self::Milk => 3.2,
            Self::Cheese => 13.5,
            Self::Eggs => 4.2,
            Self::Bread => 1.3,
            Self::Rice => 2.7,
            Self::Potatoes => 0.5,
            Self::Vegetables => 2.0,
            Self::Fruits => 1.1,
            Self::Legumes => 0.7,
            Self::Nuts => 2.3,
            Self::Coffee => 16.9,
            Self::Beer => 1.3,
            Self::Wine => 2.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beef => "Beef",
            Self::Lamb => "Lamb",
            Self::Pork => "Pork",
            Self::Chicken => "Chicken",
            Self::FarmedFish => "Fish (Farmed)",
            Self::Seafood => "Seafood",
            Self::Milk => "Dairy Milk",
            Self::Cheese => "Cheese",
            Self::Eggs => "Eggs",
            Self::Bread => "Bread",
            Self::Rice => "Rice",
            Self::Potatoes => "Potatoes",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Legumes => "Legumes/Beans",
            Self::Nuts => "Nuts",
            Self::Coffee => "Coffee",
            Self::Beer => "Beer",
            Self::Wine => "Wine",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodOrigin {
    #[default]
    Local,
    Regional,
    National,
    International,
}

impl FoodOrigin {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Local => 1.0,
            Self::Regional => 1.2,
            Self::National => 1.5,
            Self::International => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Regional => "Regional",
            Self::National => "National",
            Self::International => "International",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preparation {
    #[default]
    HomeCooked,
    Restaurant,
    FastFood,
    Processed,
}

impl Preparation {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::HomeCooked => 1.0,
            Self::Restaurant => 1.3,
            Self::FastFood => 1.8,
            Self::Processed => 1.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HomeCooked => "Home Cooked",
            Self::Restaurant => "Restaurant",
            Self::FastFood => "Fast Food",
            Self::Processed => "Processed",
        }
    }
}

fn default_waste_percent() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub food: FoodItem,
    /// kg or litres.
    pub quantity: f64,
    #[serde(default)]
    pub origin: FoodOrigin,
    #[serde(default)]
    pub preparation: Preparation,
    #[serde(default)]
    pub organic: bool,
    #[serde(default = "default_waste_percent")]
    pub waste_percent: f64,
}

impl Meal {
    pub fn co2_kg(&self) -> f64 {
        let mut per_unit =
            self.food.factor() * self.origin.multiplier() * self.preparation.multiplier();
        if self.organic {
            per_unit *= 0.9;
        }
        let waste_factor = 1.0 + magnitude(self.waste_percent) / 100.0;
        per_unit * magnitude(self.quantity) * waste_factor
    }
}

// -- Electricity --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Grid,
    Solar,
    Wind,
    Hydro,
    Nuclear,
    NaturalGas,
    Oil,
    Coal,
}

impl EnergySource {
    /// kg CO₂ per kWh.
    pub fn factor(self) -> f64 {
        match self {
            Self::Grid => 0.68,
            Self::Solar => 0.02,
            Self::Wind => 0.01,
            Self::Hydro => 0.024,
            Self::Nuclear => 0.012,
            Self::NaturalGas => 0.49,
            Self::Oil => 0.82,
            Self::Coal => 1.05,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid Electricity",
            Self::Solar => "Solar Energy",
            Self::Wind => "Wind Energy",
            Self::Hydro => "Hydroelectric",
            Self::Nuclear => "Nuclear",
            Self::NaturalGas => "Natural Gas",
            Self::Oil => "Oil",
            Self::Coal => "Coal",
        }
    }
}

/// Household loads with a typical consumption, used when no explicit kWh
/// figure is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appliance {
    WholeHouse,
    AirConditioning,
    Heating,
    WaterHeater,
    Refrigerator,
    WashingMachine,
    Dryer,
    Tv,
    Computer,
    LedLights,
    ElectricStove,
}

impl Appliance {
    pub fn typical_kwh(self) -> f64 {
        match self {
            Self::WholeHouse => 30.0,
            Self::AirConditioning => 3.5,
            Self::Heating => 4.0,
            Self::WaterHeater => 4.5,
            Self::Refrigerator => 0.15,
            Self::WashingMachine => 2.3,
            Self::Dryer => 3.3,
            Self::Tv => 0.15,
            Self::Computer => 0.3,
            Self::LedLights => 0.01,
            Self::ElectricStove => 2.3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WholeHouse => "Whole House",
            Self::AirConditioning => "Air Conditioning",
            Self::Heating => "Heating System",
            Self::WaterHeater => "Water Heater",
            Self::Refrigerator => "Refrigerator",
            Self::WashingMachine => "Washing Machine",
            Self::Dryer => "Dryer",
            Self::Tv => "TV",
            Self::Computer => "Computer",
            Self::LedLights => "LED Lights",
            Self::ElectricStove => "Electric Stove",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceEfficiency {
    #[default]
    Standard,
    EnergyStar,
    High,
    Inefficient,
}

impl ApplianceEfficiency {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::EnergyStar => 0.8,
            Self::High => 0.7,
            Self::Inefficient => 1.4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::EnergyStar => "Energy Star",
            Self::High => "High Efficiency",
            Self::Inefficient => "Old/Inefficient",
        }
    }
}

/// Grid carbon intensity shifts with demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfUse {
    #[default]
    Peak,
    OffPeak,
    Weekend,
    Night,
}

impl TimeOfUse {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Peak => 1.2,
            Self::OffPeak => 0.9,
            Self::Weekend => 0.95,
            Self::Night => 0.85,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Peak => "Peak Hours",
            Self::OffPeak => "Off-Peak",
            Self::Weekend => "Weekend",
            Self::Night => "Night",
        }
    }
}

fn default_renewable_mix() -> f64 {
    30.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyUse {
    pub source: EnergySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance: Option<Appliance>,
    /// Explicit consumption; falls back to the appliance's typical figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kwh: Option<f64>,
    #[serde(default)]
    pub efficiency: ApplianceEfficiency,
    #[serde(default)]
    pub time_of_use: TimeOfUse,
    /// Renewable share of the grid mix, 0..=100.
    #[serde(default = "default_renewable_mix")]
    pub renewable_mix_percent: f64,
}

impl EnergyUse {
    pub fn usage_kwh(&self) -> Option<f64> {
        self.kwh.or_else(|| self.appliance.map(Appliance::typical_kwh))
    }

    pub fn co2_kg(&self) -> f64 {
        let mut per_kwh = self.source.factor() * self.efficiency.multiplier();
        if self.source == EnergySource::Grid {
            let renewable = (magnitude(self.renewable_mix_percent) / 100.0).min(1.0);
            per_kwh *= 1.0 - renewable * RENEWABLE_CREDIT;
            per_kwh *= self.time_of_use.multiplier();
        }
        per_kwh * magnitude(self.usage_kwh().unwrap_or(0.0))
    }
}

// -- Other --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherKind {
    GroceryShopping,
    ClothingPurchase,
    Electronics,
    OnlineShopping,
    OfficeWork,
    RemoteWork,
    MovieTheater,
    Concert,
    Gym,
    MedicalVisit,
    PackageDelivery,
    HotShower,
    Laundry,
    Waste,
}

impl OtherKind {
    /// kg CO₂ per unit (trip, item, day, visit, ...).
    pub fn factor(self) -> f64 {
        match self {
            Self::GroceryShopping => 3.2,
            Self::ClothingPurchase => 8.5,
            Self::Electronics => 85.0,
            Self::OnlineShopping => 0.5,
            Self::OfficeWork => 6.2,
            Self::RemoteWork => 4.6,
            Self::MovieTheater => 1.8,
            Self::Concert => 5.5,
            Self::Gym => 2.1,
            Self::MedicalVisit => 3.4,
            Self::PackageDelivery => 1.2,
            Self::HotShower => 2.3,
            Self::Laundry => 2.8,
            Self::Waste => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GroceryShopping => "Grocery Shopping",
            Self::ClothingPurchase => "Clothing Purchase",
            Self::Electronics => "Electronics",
            Self::OnlineShopping => "Online Shopping",
            Self::OfficeWork => "Office Work",
            Self::RemoteWork => "Remote Work",
            Self::MovieTheater => "Movie Theater",
            Self::Concert => "Concert/Event",
            Self::Gym => "Gym/Fitness",
            Self::MedicalVisit => "Medical Visit",
            Self::PackageDelivery => "Package Delivery",
            Self::HotShower => "Hot Shower",
            Self::Laundry => "Laundry",
            Self::Waste => "Waste Generation",
        }
    }

    /// Group events whose footprint is split among attendees.
    pub fn is_shared_event(self) -> bool {
        matches!(self, Self::MovieTheater | Self::Concert | Self::Gym)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sustainability {
    #[default]
    Standard,
    EcoFriendly,
    Sustainable,
    Recycled,
}

impl Sustainability {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::EcoFriendly => 0.7,
            Self::Sustainable => 0.5,
            Self::Recycled => 0.3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::EcoFriendly => "Eco-friendly",
            Self::Sustainable => "Sustainable",
            Self::Recycled => "Recycled/Reused",
        }
    }
}

fn default_other_category() -> Category {
    Category::Other
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherActivity {
    pub kind: OtherKind,
    pub quantity: f64,
    #[serde(default)]
    pub sustainability: Sustainability,
    #[serde(default = "one")]
    pub participants: u32,
    /// Category the entry is filed under.
    #[serde(default = "default_other_category")]
    pub sub_category: Category,
}

impl OtherActivity {
    pub fn co2_kg(&self) -> f64 {
        let mut per_unit = self.kind.factor() * self.sustainability.multiplier();
        if self.participants > 1 && self.kind.is_shared_event() {
            per_unit /= f64::from(self.participants);
        }
        per_unit * magnitude(self.quantity)
    }
}
