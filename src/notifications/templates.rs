use crate::domain::{Booking, Lead, Submission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn customer_acknowledgment(submission: &Submission) -> EmailMessage {
    match submission {
        Submission::Lead(lead) => lead_acknowledgment(lead),
        Submission::Booking(booking) => booking_acknowledgment(booking),
    }
}

pub fn admin_alert(submission: &Submission) -> EmailMessage {
    match submission {
        Submission::Lead(lead) => lead_alert(lead),
        Submission::Booking(booking) => booking_alert(booking),
    }
}

fn lead_acknowledgment(lead: &Lead) -> EmailMessage {
    let miles = group_thousands(lead.miles_amount);
    EmailMessage {
        subject: "We received your miles request".into(),
        html: format!(
            "<p>Hi {},</p>\
            <p>Thanks for your request to buy <strong>{}</strong> {} miles. \
            One of our team will contact you shortly.</p>\
            <p>Reference: {}</p>",
            escape_html(&lead.first_name),
            miles,
            escape_html(&lead.airline),
            lead.id
        ),
        text: format!(
            "Hi {},\n\nThanks for your request to buy {} {} miles. \
            One of our team will contact you shortly.\n\nReference: {}",
            lead.first_name, miles, lead.airline, lead.id
        ),
    }
}

fn booking_acknowledgment(booking: &Booking) -> EmailMessage {
    let route = format!("{} to {}", booking.from_airport_code, booking.to_airport_code);
    EmailMessage {
        subject: "We received your reward flight request".into(),
        html: format!(
            "<p>Hi {},</p>\
            <p>Thanks for your reward flight request from {} on {}. \
            We will review availability and get back to you.</p>\
            <p>Reference: {}</p>",
            escape_html(&booking.first_name),
            route,
            booking.departure_date,
            booking.id
        ),
        text: format!(
            "Hi {},\n\nThanks for your reward flight request from {} on {}. \
            We will review availability and get back to you.\n\nReference: {}",
            booking.first_name, route, booking.departure_date, booking.id
        ),
    }
}

fn lead_alert(lead: &Lead) -> EmailMessage {
    let miles = group_thousands(lead.miles_amount);
    let rows = [
        ("Name", format!("{} {}", lead.first_name, lead.last_name)),
        ("Email", lead.email.clone()),
        ("Phone", phone_line(&lead.phone, lead.phone_country.as_deref())),
        ("Airline", lead.airline.clone()),
        ("Miles", miles.clone()),
        ("Message", lead.message.clone().unwrap_or_default()),
        ("Reference", lead.id.to_string()),
    ];
    EmailMessage {
        subject: format!(
            "New miles lead: {} {} ({} miles)",
            lead.first_name, lead.last_name, miles
        ),
        html: html_table("New miles purchase request", &rows),
        text: text_table("New miles purchase request", &rows),
    }
}

fn booking_alert(booking: &Booking) -> EmailMessage {
    let rows = [
        ("Name", format!("{} {}", booking.first_name, booking.last_name)),
        ("Email", booking.email.clone()),
        (
            "Phone",
            phone_line(&booking.phone, booking.phone_country.as_deref()),
        ),
        (
            "Route",
            format!("{} to {}", booking.from_airport_code, booking.to_airport_code),
        ),
        ("Departure", booking.departure_date.to_string()),
        ("Airline", booking.airline.clone()),
        ("Points", group_thousands(booking.points_required)),
        ("Flight details", booking.flight_details.clone()),
        (
            "Screenshot",
            booking.screenshot_url.clone().unwrap_or_else(|| "none".into()),
        ),
        ("Reference", booking.id.to_string()),
    ];
    EmailMessage {
        subject: format!(
            "New booking request: {} to {} on {}",
            booking.from_airport_code, booking.to_airport_code, booking.departure_date
        ),
        html: html_table("New reward flight request", &rows),
        text: text_table("New reward flight request", &rows),
    }
}

fn phone_line(phone: &str, country: Option<&str>) -> String {
    match country {
        Some(country) => format!("{} ({})", phone, country),
        None => phone.to_string(),
    }
}

fn html_table(title: &str, rows: &[(&str, String)]) -> String {
    let body: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
                label,
                escape_html(value)
            )
        })
        .collect();
    format!("<h2>{}</h2><table>{}</table>", title, body)
}

fn text_table(title: &str, rows: &[(&str, String)]) -> String {
    let body: Vec<String> = rows
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();
    format!("{}\n\n{}", title, body.join("\n"))
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
