use crate::models::{Availability, Profile, ProfileKind};

struct Sample {
    id: &'static str,
    name: &'static str,
    titles: &'static [&'static str],
    location: &'static str,
    expertise: &'static [&'static str],
    languages: &'static [&'static str],
    rating: f64,
    review_count: u32,
    availability: Availability,
    bio: &'static str,
}

const MENTORS: &[Sample] = &[
    Sample {
        id: "mentor-amara",
        name: "Amara Okafor",
        titles: &["Tax Partner"],
        location: "Lagos, Nigeria",
        expertise: &["Tax", "Corporate Finance", "Transfer Pricing"],
        languages: &["English", "Igbo"],
        rating: 4.9,
        review_count: 42,
        availability: Availability::Available,
        bio: "Twenty years advising West African groups on cross-border tax.",
    },
    Sample {
        id: "mentor-kwame",
        name: "Kwame Mensah",
        titles: &["Audit Director"],
        location: "Accra, Ghana",
        expertise: &["Audit", "Risk Management", "IFRS"],
        languages: &["English", "Twi"],
        rating: 4.7,
        review_count: 31,
        availability: Availability::Limited,
        bio: "Leads audit teams across Ghana and Côte d'Ivoire.",
    },
    Sample {
        id: "mentor-wanjiru",
        name: "Wanjiru Kamau",
        titles: &["Fintech Founder", "Angel Investor"],
        location: "Nairobi, Kenya",
        expertise: &["Fintech", "Fundraising", "Product Strategy"],
        languages: &["English", "Swahili"],
        rating: 4.8,
        review_count: 27,
        availability: Availability::Available,
        bio: "Built and sold a mobile payments startup; now mentors first-time founders.",
    },
    Sample {
        id: "mentor-thabo",
        name: "Thabo Nkosi",
        titles: &["Sustainability Lead"],
        location: "Johannesburg, South Africa",
        expertise: &["ESG", "Climate Finance", "Reporting"],
        languages: &["English", "Zulu"],
        rating: 4.6,
        review_count: 19,
        availability: Availability::Busy,
        bio: "Helps listed companies build credible ESG disclosures.",
    },
    Sample {
        id: "mentor-fatou",
        name: "Fatou Diop",
        titles: &["Legal Counsel"],
        location: "Dakar, Senegal",
        expertise: &["Corporate Law", "Compliance", "Tax"],
        languages: &["French", "Wolof", "English"],
        rating: 4.5,
        review_count: 14,
        availability: Availability::Available,
        bio: "In-house counsel for francophone telecom operators.",
    },
];

const EXPERTS: &[Sample] = &[
    Sample {
        id: "expert-chinedu",
        name: "Chinedu Eze",
        titles: &["Tax Consultant"],
        location: "Abuja, Nigeria",
        expertise: &["Tax", "VAT", "Tax Technology"],
        languages: &["English", "Igbo"],
        rating: 4.8,
        review_count: 56,
        availability: Availability::Available,
        bio: "Automates VAT compliance for Nigerian SMEs.",
    },
    Sample {
        id: "expert-aisha",
        name: "Aisha Bello",
        titles: &["Investment Analyst"],
        location: "Kano, Nigeria",
        expertise: &["Private Equity", "Valuation"],
        languages: &["English", "Hausa"],
        rating: 4.4,
        review_count: 12,
        availability: Availability::Limited,
        bio: "Covers consumer and agribusiness deals in northern Nigeria.",
    },
    Sample {
        id: "expert-lindiwe",
        name: "Lindiwe Dlamini",
        titles: &["ESG Advisor"],
        location: "Cape Town, South Africa",
        expertise: &["ESG", "Impact Investing"],
        languages: &["English", "Xhosa"],
        rating: 4.9,
        review_count: 38,
        availability: Availability::Available,
        bio: "Designs impact measurement frameworks for development funds.",
    },
    Sample {
        id: "expert-yaw",
        name: "Yaw Boateng",
        titles: &["Data Scientist"],
        location: "Kumasi, Ghana",
        expertise: &["Data Analytics", "Machine Learning"],
        languages: &["English", "Twi"],
        rating: 4.3,
        review_count: 9,
        availability: Availability::Busy,
        bio: "Credit scoring models for microfinance lenders.",
    },
    Sample {
        id: "expert-amina",
        name: "Amina Hassan",
        titles: &["Public Policy Advisor"],
        location: "Dar es Salaam, Tanzania",
        expertise: &["Public Policy", "Tax Policy"],
        languages: &["English", "Swahili"],
        rating: 4.6,
        review_count: 21,
        availability: Availability::Available,
        bio: "Advises East African revenue authorities on tax policy reform.",
    },
    Sample {
        id: "expert-youssef",
        name: "Youssef Benali",
        titles: &["Supply Chain Manager"],
        location: "Casablanca, Morocco",
        expertise: &["Logistics", "Trade Finance"],
        languages: &["Arabic", "French", "English"],
        rating: 4.2,
        review_count: 7,
        availability: Availability::Available,
        bio: "Runs export logistics between North and West Africa.",
    },
    Sample {
        id: "expert-grace",
        name: "Grace Mutesi",
        titles: &["HR Director"],
        location: "Kigali, Rwanda",
        expertise: &["Leadership", "Talent Development"],
        languages: &["English", "Kinyarwanda", "French"],
        rating: 4.7,
        review_count: 25,
        availability: Availability::Limited,
        bio: "Builds leadership programmes for growing teams.",
    },
];

/// Built-in directory used when the directory source is unavailable
pub fn sample_directory(kind: ProfileKind) -> Vec<Profile> {
    let samples = match kind {
        ProfileKind::Mentor => MENTORS,
        ProfileKind::Expert => EXPERTS,
    };

    samples
        .iter()
        .map(|s| Profile {
            id: s.id.to_string(),
            name: s.name.to_string(),
            kind,
            titles: s.titles.iter().map(|t| t.to_string()).collect(),
            location: s.location.to_string(),
            expertise: s.expertise.iter().map(|t| t.to_string()).collect(),
            languages: s.languages.iter().map(|t| t.to_string()).collect(),
            rating: Some(s.rating),
            review_count: s.review_count,
            availability: s.availability,
            bio: s.bio.to_string(),
        })
        .collect()
}
