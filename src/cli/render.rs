//! Terminal output for pages and records.

use propdesk::models::{AgentResponse, KycStatus, PropertyResponse, SellerResponse, UserResponse};
use propdesk::notifications::NotificationCenter;
use propdesk::pagination::PageWindow;
use propdesk::views::{FieldDisplay, ListingList};

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn kyc(status: Option<KycStatus>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("-")
}

pub fn listing_card(number: usize, property: &PropertyResponse) {
    let mut badges = vec![property.status().label()];
    if property.vip {
        badges.push("VIP");
    }
    if property.rera_verified {
        badges.push("RERA");
    }

    println!("{}. {} [{}]", number, property.display_title(), badges.join(", "));
    let place: Vec<&str> = [&property.locality, &property.city, &property.state]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect();
    if !place.is_empty() {
        println!("   {}", place.join(", "));
    }
    let price = property
        .price
        .map(|p| format!("₹{p:.0}"))
        .unwrap_or_else(|| "Price on request".to_string());
    println!(
        "   {} · {} · {}",
        or_dash(&property.category),
        or_dash(&property.preference),
        price
    );
    if let Some(reason) = &property.rejection_reason {
        println!("   Rejected: {}", reason);
    }
    println!("   ID: {}", property.id);
    println!();
}

pub fn page_bar(window: PageWindow, total: usize) {
    println!("{}    ({} total)", window, total);
}

pub fn listing_page(title: &str, list: &ListingList) {
    println!("{} · {}", title, list.scope());
    println!();
    if let Some(error) = list.error() {
        println!("⚠️  {}", error);
        return;
    }
    if list.items().is_empty() {
        println!("No listings found.");
        return;
    }
    let offset = list.page() * list.size();
    for (i, property) in list.items().iter().enumerate() {
        listing_card(offset + i + 1, property);
    }
    page_bar(list.window(), list.total_elements());
}

pub fn fields(title: &str, fields: &[FieldDisplay]) {
    println!("{}", title);
    println!();
    let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
    for field in fields {
        println!("  {:width$}  {}", field.label, field.value, width = width);
    }
}

pub fn notifications(title: &str, center: &NotificationCenter) {
    println!("{} · {} unread", title, center.counter().get());
    println!();
    if center.items().is_empty() {
        println!("No notifications.");
        return;
    }
    for n in center.page_items() {
        let marker = if center.is_new(n.id) {
            "🆕"
        } else if n.viewed {
            "  "
        } else {
            "• "
        };
        let when = n
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("{} #{} {} {}", marker, n.id, when, n.message);
    }
    println!();
    page_bar(center.window(), center.items().len());
}

pub fn users(users: &[UserResponse], window: PageWindow, total: usize) {
    for user in users {
        println!(
            "{}  {}  {}  KYC: {}",
            user.id,
            or_dash(&user.name),
            or_dash(&user.email),
            kyc(user.kyc_status)
        );
    }
    println!();
    page_bar(window, total);
}

pub fn agents(agents: &[AgentResponse]) {
    for agent in agents {
        println!(
            "{}  {}  {}  RERA: {}  KYC: {}",
            agent.id,
            or_dash(&agent.name),
            or_dash(&agent.agency_name),
            or_dash(&agent.rera_number),
            kyc(agent.kyc_status)
        );
    }
}

pub fn kyc_queue(sellers: &[SellerResponse]) {
    if sellers.is_empty() {
        println!("No pending KYC submissions.");
        return;
    }
    for seller in sellers {
        println!(
            "{}  {}  {}  {} document(s)",
            seller.id,
            or_dash(&seller.name),
            or_dash(&seller.phone),
            seller.documents.len()
        );
    }
}

pub fn agent_profile(agent: &AgentResponse) {
    println!("{}", or_dash(&agent.name));
    println!("  Email:   {}", or_dash(&agent.email));
    println!("  Phone:   {}", or_dash(&agent.phone));
    println!("  Agency:  {}", or_dash(&agent.agency_name));
    println!("  RERA:    {}", or_dash(&agent.rera_number));
    println!("  KYC:     {}", kyc(agent.kyc_status));
}

pub fn user_profile(user: &UserResponse) {
    println!("{}", or_dash(&user.name));
    println!("  Email:   {}", or_dash(&user.email));
    println!("  Phone:   {}", or_dash(&user.phone));
    println!("  KYC:     {}", kyc(user.kyc_status));
}
