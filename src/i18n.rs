//! Public site locales. Every public page lives under `/{locale}/...`;
//! the back office and the JSON API are not localised.

use crate::domain::car::CarStatus;
use crate::domain::inventory::SortOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Nl,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Nl, Locale::En];
    pub const DEFAULT: Locale = Locale::Nl;

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "nl" => Some(Locale::Nl),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Nl => "nl",
            Locale::En => "en",
        }
    }

    /// Prefix an unlocalised site path: `/cars` becomes `/nl/cars`, `/` becomes `/nl`.
    pub fn href(self, path: &str) -> String {
        match path.trim_start_matches('/') {
            "" => format!("/{}", self.as_str()),
            rest => format!("/{}/{rest}", self.as_str()),
        }
    }

    /// Locale of a request path, falling back to the default for unprefixed paths.
    pub fn of_path(path: &str) -> Self {
        path.split('/')
            .find(|s| !s.is_empty())
            .and_then(Locale::parse)
            .unwrap_or(Locale::DEFAULT)
    }

    /// Best supported match for an `Accept-Language` header.
    pub fn negotiate(accept_language: Option<&str>) -> Self {
        let Some(header) = accept_language else {
            return Locale::DEFAULT;
        };

        let mut best: Option<(Locale, f32)> = None;
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or("").trim();
            let primary = tag.split('-').next().unwrap_or("").to_ascii_lowercase();
            let Some(locale) = Locale::parse(&primary) else {
                continue;
            };
            let q = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            if q > 0.0 && best.map_or(true, |(_, b)| q > b) {
                best = Some((locale, q));
            }
        }
        best.map_or(Locale::DEFAULT, |(locale, _)| locale)
    }

    pub fn text(self) -> &'static Text {
        match self {
            Locale::Nl => &NL,
            Locale::En => &EN,
        }
    }
}

/// Every user-facing string of the public site, one table per locale.
pub struct Text {
    pub nav_home: &'static str,
    pub nav_inventory: &'static str,
    pub nav_bodyshop: &'static str,
    pub nav_about: &'static str,
    pub nav_contact: &'static str,
    pub footer_tagline: &'static str,
    pub footer_contact: &'static str,
    pub footer_rights: &'static str,
    pub switch_language: &'static str,

    pub home_title: &'static str,
    pub hero_title: &'static str,
    pub hero_lead: &'static str,
    pub browse_inventory: &'static str,
    pub contact_us: &'static str,
    pub featured_heading: &'static str,
    pub featured_empty: &'static str,
    pub see_all_cars: &'static str,
    pub benefits: [(&'static str, &'static str); 3],
    pub cta_heading: &'static str,
    pub cta_text: &'static str,
    pub cta_button: &'static str,

    pub inventory_title: &'static str,
    pub inventory_heading: &'static str,
    pub search: &'static str,
    pub search_placeholder: &'static str,
    pub brand: &'static str,
    pub all_brands: &'static str,
    pub all: &'static str,
    pub fuel: &'static str,
    pub transmission: &'static str,
    pub body: &'static str,
    pub condition: &'static str,
    pub max_price: &'static str,
    pub max_mileage: &'static str,
    pub sort: &'static str,
    pub sort_newest: &'static str,
    pub sort_price_asc: &'static str,
    pub sort_price_desc: &'static str,
    pub sort_mileage_asc: &'static str,
    pub apply: &'static str,
    pub reset_filters: &'static str,
    pub cars_found: &'static str,
    pub page: &'static str,
    pub of: &'static str,
    pub no_matches: &'static str,
    pub previous: &'static str,
    pub next: &'static str,

    pub no_photo: &'static str,
    pub photo: &'static str,
    pub status_reserved: &'static str,
    pub status_sold: &'static str,
    pub status_available: &'static str,

    pub back_to_inventory: &'static str,
    pub year: &'static str,
    pub mileage: &'static str,
    pub exterior: &'static str,
    pub interior: &'static str,
    pub power: &'static str,
    pub engine: &'static str,
    pub drivetrain: &'static str,
    pub seats: &'static str,
    pub doors: &'static str,
    pub ask_whatsapp: &'static str,
    pub whatsapp_greeting: &'static str,
    pub view_car_pass: &'static str,
    pub features: &'static str,
    pub description: &'static str,
    pub interested: &'static str,
    pub similar_cars: &'static str,

    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub phone_optional: &'static str,
    pub message: &'static str,
    pub message_optional: &'static str,
    pub inquiry_prefill: &'static str,
    pub send_message: &'static str,
    pub chassis_number: &'static str,
    pub service: &'static str,
    pub choose_service: &'static str,
    pub request_appointment: &'static str,
    pub service_labels: [(&'static str, &'static str); 6],

    pub bodyshop_title: &'static str,
    pub our_services: &'static str,
    pub bodyshop_services: [(&'static str, &'static str); 4],
    pub how_it_works: &'static str,
    pub bodyshop_steps: [&'static str; 3],
    pub appointment_heading: &'static str,

    pub contact_title: &'static str,
    pub contact_heading: &'static str,
    pub contact_lead: &'static str,
    pub visit_showroom: &'static str,
    pub opening_hours: &'static str,
    pub hours: [&'static str; 2],

    pub about_title: &'static str,
    pub about_heading: &'static str,
    pub about_lead: &'static str,
    pub about_body: [&'static str; 2],
    pub why_buy: &'static str,
    pub reasons: [&'static str; 4],

    pub thank_you_title: &'static str,
    pub thank_you_heading: &'static str,
    pub lead_received: &'static str,
    pub appointment_received: &'static str,
    pub continue_browsing: &'static str,

    pub error: &'static str,
    pub back_home: &'static str,
}

impl Text {
    pub fn sort_label(&self, order: SortOrder) -> &'static str {
        match order {
            SortOrder::Newest => self.sort_newest,
            SortOrder::PriceAsc => self.sort_price_asc,
            SortOrder::PriceDesc => self.sort_price_desc,
            SortOrder::MileageAsc => self.sort_mileage_asc,
        }
    }

    pub fn status_label(&self, status: CarStatus) -> &'static str {
        match status {
            CarStatus::Available => self.status_available,
            CarStatus::Reserved => self.status_reserved,
            CarStatus::Sold => self.status_sold,
        }
    }
}

pub static NL: Text = Text {
    nav_home: "Home",
    nav_inventory: "Aanbod",
    nav_bodyshop: "Carrosserie",
    nav_about: "Over ons",
    nav_contact: "Contact",
    footer_tagline: "Zorgvuldig geselecteerde premium- en sportwagens, gekeurd en klaar om te rijden.",
    footer_contact: "Contact",
    footer_rights: "© CarCity. Alle rechten voorbehouden.",
    switch_language: "Taal",

    home_title: "Premium tweedehandswagens",
    hero_title: "Uw volgende wagen staat klaar bij CarCity",
    hero_lead: "Premium-, sport- en gezinswagens. Elke wagen gekeurd, elke prijs transparant.",
    browse_inventory: "Bekijk ons aanbod",
    contact_us: "Contacteer ons",
    featured_heading: "Uitgelichte wagens",
    featured_empty: "Nieuwe wagens zijn onderweg. Kom binnenkort terug.",
    see_all_cars: "Alle wagens bekijken →",
    benefits: [
        ("Gekeurd", "Elke wagen doorstaat een volledige technische controle voor hij online komt."),
        ("Car-Pass", "Gecontroleerde kilometerhistoriek voor elk Belgisch voertuig."),
        ("Carrosserie", "Onze eigen carrosserie voor herstellingen, spuitwerk en detailing."),
    ],
    cta_heading: "Op zoek naar iets specifieks?",
    cta_text: "Vertel ons wat u zoekt en wij vinden het voor u.",
    cta_button: "Neem contact op",

    inventory_title: "Aanbod",
    inventory_heading: "Ons aanbod",
    search: "Zoeken",
    search_placeholder: "Merk, model...",
    brand: "Merk",
    all_brands: "Alle merken",
    all: "Alle",
    fuel: "Brandstof",
    transmission: "Transmissie",
    body: "Carrosserietype",
    condition: "Staat",
    max_price: "Max. prijs",
    max_mileage: "Max. kilometerstand",
    sort: "Sorteren",
    sort_newest: "Nieuwste eerst",
    sort_price_asc: "Prijs: laag naar hoog",
    sort_price_desc: "Prijs: hoog naar laag",
    sort_mileage_asc: "Kilometerstand: laag naar hoog",
    apply: "Toepassen",
    reset_filters: "Filters wissen",
    cars_found: "wagens gevonden",
    page: "pagina",
    of: "van",
    no_matches: "Geen wagens gevonden voor deze filters.",
    previous: "‹ Vorige",
    next: "Volgende ›",

    no_photo: "Nog geen foto",
    photo: "foto",
    status_reserved: "Gereserveerd",
    status_sold: "Verkocht",
    status_available: "Beschikbaar",

    back_to_inventory: "← Terug naar het aanbod",
    year: "Bouwjaar",
    mileage: "Kilometerstand",
    exterior: "Kleur exterieur",
    interior: "Kleur interieur",
    power: "Vermogen",
    engine: "Motor",
    drivetrain: "Aandrijving",
    seats: "Zitplaatsen",
    doors: "Deuren",
    ask_whatsapp: "Vraag het via WhatsApp",
    whatsapp_greeting: "Hallo, ik heb interesse in de",
    view_car_pass: "Bekijk Car-Pass",
    features: "Uitrusting",
    description: "Beschrijving",
    interested: "Interesse?",
    similar_cars: "Vergelijkbare wagens",

    name: "Naam",
    email: "E-mail",
    phone: "Telefoon",
    phone_optional: "Telefoon (optioneel)",
    message: "Bericht",
    message_optional: "Bericht (optioneel)",
    inquiry_prefill: "Ik heb interesse in de",
    send_message: "Verstuur bericht",
    chassis_number: "Chassisnummer (VIN)",
    service: "Dienst",
    choose_service: "Kies een dienst...",
    request_appointment: "Afspraak aanvragen",
    service_labels: [
        ("damage_repair", "Schadeherstel"),
        ("paintwork", "Spuitwerk"),
        ("dent_removal", "Deukherstel"),
        ("polishing", "Polieren & detailing"),
        ("insurance_claim", "Verzekeringsdossier"),
        ("other", "Andere"),
    ],

    bodyshop_title: "Carrosserie",
    our_services: "Onze diensten",
    bodyshop_services: [
        ("Onderhoud & herstellingen", "Alle carrosserieherstellingen en preventief onderhoud."),
        ("Schadeherstel", "Vakkundig herstel van ongevalsschade en deuken."),
        ("Snelle service", "Korte doorlooptijd zonder in te boeten aan kwaliteit."),
        ("Vakmanschap", "Gecertificeerde vakmensen met jarenlange ervaring."),
    ],
    how_it_works: "Hoe werkt het?",
    bodyshop_steps: [
        "Vul het formulier in met uw gegevens en chassisnummer.",
        "Wij nemen binnen één werkdag contact op.",
        "U brengt uw wagen binnen op het afgesproken moment.",
    ],
    appointment_heading: "Vraag een afspraak aan",

    contact_title: "Contact",
    contact_heading: "Contacteer ons",
    contact_lead: "Vragen over een wagen, een inruil of financiering? Stuur ons een bericht.",
    visit_showroom: "Bezoek de showroom",
    opening_hours: "Openingsuren",
    hours: ["Ma–vr 9:00–18:00", "Za 10:00–17:00"],

    about_title: "Over ons",
    about_heading: "Over CarCity",
    about_lead: "CarCity is een familiebedrijf gespecialiseerd in premium- en sportwagens.",
    about_body: [
        "We selecteren elke wagen zelf, controleren de historiek en maken hem klaar in onze eigen werkplaats. ",
        "Wat u online ziet, is wat u mee naar huis rijdt.",
    ],
    why_buy: "Waarom bij ons kopen",
    reasons: [
        "Transparante prijzen, geen verborgen kosten",
        "Car-Pass en volledige onderhoudshistoriek",
        "Inruil en financiering op aanvraag",
        "Eigen carrosserie voor de naverkoop",
    ],

    thank_you_title: "Bedankt",
    thank_you_heading: "Bedankt!",
    lead_received: "We hebben uw bericht ontvangen en nemen snel contact met u op.",
    appointment_received: "Uw afspraakaanvraag is goed ontvangen. We contacteren u binnen één werkdag.",
    continue_browsing: "Verder kijken",

    error: "Fout",
    back_home: "← Terug naar home",
};

pub static EN: Text = Text {
    nav_home: "Home",
    nav_inventory: "Inventory",
    nav_bodyshop: "Body shop",
    nav_about: "About",
    nav_contact: "Contact",
    footer_tagline: "Hand-picked premium and sports cars, inspected and ready to drive.",
    footer_contact: "Contact",
    footer_rights: "© CarCity. All rights reserved.",
    switch_language: "Language",

    home_title: "Premium used cars",
    hero_title: "Your next car is waiting at CarCity",
    hero_lead: "Premium, sport and family cars. Every vehicle inspected, every price transparent.",
    browse_inventory: "Browse inventory",
    contact_us: "Contact us",
    featured_heading: "Featured cars",
    featured_empty: "New arrivals are on their way. Check back soon.",
    see_all_cars: "See all cars →",
    benefits: [
        ("Inspected", "Every car passes a full technical check before it is listed."),
        ("Car-Pass", "Verified mileage history for every Belgian vehicle."),
        ("Body shop", "Our own carrosserie for repairs, paintwork and detailing."),
    ],
    cta_heading: "Looking for something specific?",
    cta_text: "Tell us what you want and we will find it for you.",
    cta_button: "Get in touch",

    inventory_title: "Inventory",
    inventory_heading: "Our inventory",
    search: "Search",
    search_placeholder: "Brand, model...",
    brand: "Brand",
    all_brands: "All brands",
    all: "All",
    fuel: "Fuel",
    transmission: "Transmission",
    body: "Body",
    condition: "Condition",
    max_price: "Max price",
    max_mileage: "Max mileage",
    sort: "Sort",
    sort_newest: "Newest first",
    sort_price_asc: "Price: low to high",
    sort_price_desc: "Price: high to low",
    sort_mileage_asc: "Mileage: low to high",
    apply: "Apply",
    reset_filters: "Reset filters",
    cars_found: "cars found",
    page: "page",
    of: "of",
    no_matches: "No cars match these filters.",
    previous: "‹ Previous",
    next: "Next ›",

    no_photo: "No photo yet",
    photo: "photo",
    status_reserved: "Reserved",
    status_sold: "Sold",
    status_available: "Available",

    back_to_inventory: "← Back to inventory",
    year: "Year",
    mileage: "Mileage",
    exterior: "Exterior",
    interior: "Interior",
    power: "Power",
    engine: "Engine",
    drivetrain: "Drivetrain",
    seats: "Seats",
    doors: "Doors",
    ask_whatsapp: "Ask on WhatsApp",
    whatsapp_greeting: "Hello, I'm interested in the",
    view_car_pass: "View Car-Pass",
    features: "Features",
    description: "Description",
    interested: "Interested?",
    similar_cars: "Similar cars",

    name: "Name",
    email: "Email",
    phone: "Phone",
    phone_optional: "Phone (optional)",
    message: "Message",
    message_optional: "Message (optional)",
    inquiry_prefill: "I'm interested in the",
    send_message: "Send message",
    chassis_number: "Chassis number (VIN)",
    service: "Service",
    choose_service: "Choose a service...",
    request_appointment: "Request appointment",
    service_labels: [
        ("damage_repair", "Damage repair"),
        ("paintwork", "Paintwork"),
        ("dent_removal", "Dent removal"),
        ("polishing", "Polishing & detailing"),
        ("insurance_claim", "Insurance claim"),
        ("other", "Other"),
    ],

    bodyshop_title: "Body shop",
    our_services: "Our services",
    bodyshop_services: [
        ("Maintenance & repairs", "All types of body repairs and preventive maintenance."),
        ("Damage repair", "Professional repair of accident damage and dents."),
        ("Fast service", "Short turnaround without compromising on quality."),
        ("Craftsmanship", "Certified professionals with years of experience."),
    ],
    how_it_works: "How it works",
    bodyshop_steps: [
        "Fill in the form with your details and chassis number.",
        "We contact you within one working day.",
        "Drop off your car at the agreed time.",
    ],
    appointment_heading: "Request an appointment",

    contact_title: "Contact",
    contact_heading: "Contact us",
    contact_lead: "Questions about a car, a trade-in or financing? Send us a message.",
    visit_showroom: "Visit the showroom",
    opening_hours: "Opening hours",
    hours: ["Mon–Fri 9:00–18:00", "Sat 10:00–17:00"],

    about_title: "About",
    about_heading: "About CarCity",
    about_lead: "CarCity is a family-run dealership specialised in premium and sports cars.",
    about_body: [
        "We hand-pick every vehicle, check its history and prepare it in our own workshop. ",
        "What you see online is what you drive home.",
    ],
    why_buy: "Why buy with us",
    reasons: [
        "Transparent pricing, no hidden fees",
        "Car-Pass and full service history",
        "Trade-in and financing on request",
        "Own body shop for after-sales care",
    ],

    thank_you_title: "Thank you",
    thank_you_heading: "Thank you!",
    lead_received: "We received your message and will get back to you shortly.",
    appointment_received: "Your appointment request is in. We will contact you within one working day.",
    continue_browsing: "Continue browsing",

    error: "Error",
    back_home: "← Back to home",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::SERVICE_TYPES;

    #[test]
    fn hrefs_carry_the_prefix() {
        assert_eq!(Locale::Nl.href("/"), "/nl");
        assert_eq!(Locale::En.href("/cars"), "/en/cars");
        assert_eq!(Locale::En.href("/cars/bmw-m4-abc123"), "/en/cars/bmw-m4-abc123");
    }

    #[test]
    fn path_locale_falls_back_to_dutch() {
        assert_eq!(Locale::of_path("/en/cars"), Locale::En);
        assert_eq!(Locale::of_path("/nl"), Locale::Nl);
        assert_eq!(Locale::of_path("/fr/cars"), Locale::Nl);
        assert_eq!(Locale::of_path("/"), Locale::Nl);
    }

    #[test]
    fn accept_language_picks_best_supported() {
        assert_eq!(Locale::negotiate(None), Locale::Nl);
        assert_eq!(Locale::negotiate(Some("en-GB,en;q=0.9")), Locale::En);
        assert_eq!(Locale::negotiate(Some("fr-BE,en;q=0.5,nl;q=0.8")), Locale::Nl);
        assert_eq!(Locale::negotiate(Some("de,fr")), Locale::Nl);
        assert_eq!(Locale::negotiate(Some("en;q=0")), Locale::Nl);
    }

    #[test]
    fn service_tables_follow_known_services() {
        for text in [&NL, &EN] {
            let values: Vec<&str> = text.service_labels.iter().map(|(v, _)| *v).collect();
            let known: Vec<&str> = SERVICE_TYPES.iter().map(|(v, _)| *v).collect();
            assert_eq!(values, known);
        }
    }
}
