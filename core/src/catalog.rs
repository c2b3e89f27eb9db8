//! Static directories backing the country and city pickers.

/// A city listed in a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    /// City name as stored on events.
    pub name: &'static str,
    /// State for Indian cities, country for global ones.
    pub region: &'static str,
}

const fn city(name: &'static str, region: &'static str) -> City {
    City { name, region }
}

/// Countries offered in the search bar.
pub const POPULAR_COUNTRIES: &[&str] = &[
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Netherlands",
    "Sweden",
    "Japan",
    "Singapore",
    "India",
    "China",
    "Brazil",
];

/// Indian city directory, region is the state.
pub const INDIAN_CITIES: &[City] = &[
    city("Mumbai", "Maharashtra"),
    city("Delhi", "Delhi"),
    city("Bangalore", "Karnataka"),
    city("Hyderabad", "Telangana"),
    city("Chennai", "Tamil Nadu"),
    city("Kolkata", "West Bengal"),
    city("Pune", "Maharashtra"),
    city("Ahmedabad", "Gujarat"),
    city("Jaipur", "Rajasthan"),
    city("Surat", "Gujarat"),
    city("Lucknow", "Uttar Pradesh"),
    city("Kanpur", "Uttar Pradesh"),
    city("Nagpur", "Maharashtra"),
    city("Indore", "Madhya Pradesh"),
    city("Thane", "Maharashtra"),
    city("Bhopal", "Madhya Pradesh"),
    city("Visakhapatnam", "Andhra Pradesh"),
    city("Pimpri-Chinchwad", "Maharashtra"),
    city("Patna", "Bihar"),
    city("Vadodara", "Gujarat"),
];

/// Global city directory, region is the country.
pub const GLOBAL_CITIES: &[City] = &[
    city("New York", "United States"),
    city("London", "United Kingdom"),
    city("Tokyo", "Japan"),
    city("Paris", "France"),
    city("Singapore", "Singapore"),
    city("Sydney", "Australia"),
    city("Toronto", "Canada"),
    city("Berlin", "Germany"),
    city("Dubai", "United Arab Emirates"),
    city("Hong Kong", "Hong Kong"),
    city("Amsterdam", "Netherlands"),
    city("Barcelona", "Spain"),
    city("Stockholm", "Sweden"),
    city("Zurich", "Switzerland"),
    city("Vienna", "Austria"),
    city("Copenhagen", "Denmark"),
    city("Seoul", "South Korea"),
    city("Melbourne", "Australia"),
    city("Vancouver", "Canada"),
    city("Munich", "Germany"),
];

/// Indian states and union territories.
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Lakshadweep",
    "Puducherry",
];

/// The first `count` cities of a directory.
#[must_use]
pub fn top_cities(cities: &[City], count: usize) -> &[City] {
    &cities[..count.min(cities.len())]
}

/// Global cities in `country`.
pub fn cities_by_country(country: &str) -> impl Iterator<Item = &'static City> + '_ {
    GLOBAL_CITIES.iter().filter(move |city| city.region == country)
}

/// Indian cities in `state`.
pub fn cities_by_state(state: &str) -> impl Iterator<Item = &'static City> + '_ {
    INDIAN_CITIES.iter().filter(move |city| city.region == state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_cities_caps_at_length() {
        assert_eq!(top_cities(INDIAN_CITIES, 12).len(), 12);
        assert_eq!(top_cities(GLOBAL_CITIES, 500).len(), GLOBAL_CITIES.len());
    }

    #[test]
    fn test_lookup_by_region() {
        let maharashtra: Vec<_> = cities_by_state("Maharashtra").map(|city| city.name).collect();
        assert_eq!(maharashtra, vec!["Mumbai", "Pune", "Nagpur", "Thane", "Pimpri-Chinchwad"]);

        let australia: Vec<_> = cities_by_country("Australia").map(|city| city.name).collect();
        assert_eq!(australia, vec!["Sydney", "Melbourne"]);
    }
}
