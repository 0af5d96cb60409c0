use crate::airports::Airport;

/// Codes shown before the user has typed anything meaningful.
pub const POPULAR_CODES: [&str; 15] = [
    "DXB", "LHR", "JFK", "CDG", "SIN", "DOH", "AUH", "HKG", "LAX", "FRA", "IST", "AMS", "NRT",
    "SYD", "BKK",
];

/// Served when the directory itself is unusable.
const FALLBACK_CODES: [&str; 6] = ["DXB", "LHR", "JFK", "CDG", "SIN", "DOH"];

// (code, name, city, country)
const AIRPORTS: &[(&str, &str, &str, &str)] = &[
    ("AMS", "Amsterdam Airport Schiphol", "Amsterdam", "Netherlands"),
    ("ARN", "Stockholm Arlanda Airport", "Stockholm", "Sweden"),
    ("ATH", "Athens International Airport", "Athens", "Greece"),
    ("ATL", "Hartsfield-Jackson Atlanta International Airport", "Atlanta", "United States"),
    ("AUH", "Zayed International Airport", "Abu Dhabi", "United Arab Emirates"),
    ("BAH", "Bahrain International Airport", "Manama", "Bahrain"),
    ("BCN", "Josep Tarradellas Barcelona-El Prat Airport", "Barcelona", "Spain"),
    ("BEY", "Beirut-Rafic Hariri International Airport", "Beirut", "Lebanon"),
    ("BKK", "Suvarnabhumi Airport", "Bangkok", "Thailand"),
    ("BLR", "Kempegowda International Airport", "Bangalore", "India"),
    ("BOM", "Chhatrapati Shivaji Maharaj International Airport", "Mumbai", "India"),
    ("BOS", "Logan International Airport", "Boston", "United States"),
    ("BRU", "Brussels Airport", "Brussels", "Belgium"),
    ("CAI", "Cairo International Airport", "Cairo", "Egypt"),
    ("CDG", "Paris Charles de Gaulle Airport", "Paris", "France"),
    ("CGK", "Soekarno-Hatta International Airport", "Jakarta", "Indonesia"),
    ("CMB", "Bandaranaike International Airport", "Colombo", "Sri Lanka"),
    ("CPH", "Copenhagen Airport", "Copenhagen", "Denmark"),
    ("CPT", "Cape Town International Airport", "Cape Town", "South Africa"),
    ("DEL", "Indira Gandhi International Airport", "Delhi", "India"),
    ("DFW", "Dallas/Fort Worth International Airport", "Dallas", "United States"),
    ("DMM", "King Fahd International Airport", "Dammam", "Saudi Arabia"),
    ("DOH", "Hamad International Airport", "Doha", "Qatar"),
    ("DUB", "Dublin Airport", "Dublin", "Ireland"),
    ("DUS", "Dusseldorf Airport", "Dusseldorf", "Germany"),
    ("DWC", "Al Maktoum International Airport", "Dubai", "United Arab Emirates"),
    ("DXB", "Dubai International Airport", "Dubai", "United Arab Emirates"),
    ("EWR", "Newark Liberty International Airport", "Newark", "United States"),
    ("FCO", "Leonardo da Vinci-Fiumicino Airport", "Rome", "Italy"),
    ("FRA", "Frankfurt Airport", "Frankfurt", "Germany"),
    ("GRU", "Sao Paulo/Guarulhos International Airport", "Sao Paulo", "Brazil"),
    ("GVA", "Geneva Airport", "Geneva", "Switzerland"),
    ("HEL", "Helsinki Airport", "Helsinki", "Finland"),
    ("HKG", "Hong Kong International Airport", "Hong Kong", "Hong Kong"),
    ("HND", "Haneda Airport", "Tokyo", "Japan"),
    ("IAD", "Washington Dulles International Airport", "Washington", "United States"),
    ("ICN", "Incheon International Airport", "Seoul", "South Korea"),
    ("IST", "Istanbul Airport", "Istanbul", "Turkey"),
    ("JED", "King Abdulaziz International Airport", "Jeddah", "Saudi Arabia"),
    ("JFK", "John F. Kennedy International Airport", "New York", "United States"),
    ("JNB", "O. R. Tambo International Airport", "Johannesburg", "South Africa"),
    ("KHI", "Jinnah International Airport", "Karachi", "Pakistan"),
    ("KTM", "Tribhuvan International Airport", "Kathmandu", "Nepal"),
    ("KUL", "Kuala Lumpur International Airport", "Kuala Lumpur", "Malaysia"),
    ("KWI", "Kuwait International Airport", "Kuwait City", "Kuwait"),
    ("LAX", "Los Angeles International Airport", "Los Angeles", "United States"),
    ("LGA", "LaGuardia Airport", "New York", "United States"),
    ("LGW", "London Gatwick Airport", "London", "United Kingdom"),
    ("LHE", "Allama Iqbal International Airport", "Lahore", "Pakistan"),
    ("LHR", "London Heathrow Airport", "London", "United Kingdom"),
    ("LIS", "Humberto Delgado Airport", "Lisbon", "Portugal"),
    ("MAD", "Adolfo Suarez Madrid-Barajas Airport", "Madrid", "Spain"),
    ("MAN", "Manchester Airport", "Manchester", "United Kingdom"),
    ("MCT", "Muscat International Airport", "Muscat", "Oman"),
    ("MEL", "Melbourne Airport", "Melbourne", "Australia"),
    ("MEX", "Mexico City International Airport", "Mexico City", "Mexico"),
    ("MIA", "Miami International Airport", "Miami", "United States"),
    ("MLE", "Velana International Airport", "Male", "Maldives"),
    ("MNL", "Ninoy Aquino International Airport", "Manila", "Philippines"),
    ("MUC", "Munich Airport", "Munich", "Germany"),
    ("MXP", "Milan Malpensa Airport", "Milan", "Italy"),
    ("NBO", "Jomo Kenyatta International Airport", "Nairobi", "Kenya"),
    ("NRT", "Narita International Airport", "Tokyo", "Japan"),
    ("ORD", "O'Hare International Airport", "Chicago", "United States"),
    ("OSL", "Oslo Airport, Gardermoen", "Oslo", "Norway"),
    ("PEK", "Beijing Capital International Airport", "Beijing", "China"),
    ("PVG", "Shanghai Pudong International Airport", "Shanghai", "China"),
    ("RUH", "King Khalid International Airport", "Riyadh", "Saudi Arabia"),
    ("SEA", "Seattle-Tacoma International Airport", "Seattle", "United States"),
    ("SFO", "San Francisco International Airport", "San Francisco", "United States"),
    ("SHJ", "Sharjah International Airport", "Sharjah", "United Arab Emirates"),
    ("SIN", "Singapore Changi Airport", "Singapore", "Singapore"),
    ("SYD", "Sydney Kingsford Smith Airport", "Sydney", "Australia"),
    ("TLV", "Ben Gurion Airport", "Tel Aviv", "Israel"),
    ("TPE", "Taiwan Taoyuan International Airport", "Taipei", "Taiwan"),
    ("VIE", "Vienna International Airport", "Vienna", "Austria"),
    ("WAW", "Warsaw Chopin Airport", "Warsaw", "Poland"),
    ("YUL", "Montreal-Trudeau International Airport", "Montreal", "Canada"),
    ("YVR", "Vancouver International Airport", "Vancouver", "Canada"),
    ("YYZ", "Toronto Pearson International Airport", "Toronto", "Canada"),
    ("ZRH", "Zurich Airport", "Zurich", "Switzerland"),
];

fn to_airport(&(code, name, city, country): &(&str, &str, &str, &str)) -> Airport {
    Airport {
        code: code.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
    }
}

/// The curated reference list the directory is rebuilt from.
pub fn curated() -> Vec<Airport> {
    AIRPORTS.iter().map(to_airport).collect()
}

pub fn fallback() -> Vec<Airport> {
    AIRPORTS
        .iter()
        .filter(|(code, ..)| FALLBACK_CODES.contains(code))
        .map(to_airport)
        .collect()
}
