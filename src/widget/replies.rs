// src/widget/replies.rs
//! Canned agent replies. `**text**` marks bold, newlines are kept.

use super::classifier::Category;

pub fn reply_for(category: Category, user_name: &str) -> String {
    match category {
        Category::Orders => orders(user_name),
        Category::Returns => returns(user_name),
        Category::Products => products(),
        Category::Billing => billing(user_name),
        Category::Technical => technical(),
        Category::Greeting => greeting(user_name),
        Category::Gratitude => gratitude(user_name),
        Category::Fallback => fallback(),
    }
}

fn orders(user_name: &str) -> String {
    format!(
        "Hi {user_name}! I found the recent orders on your account:\n\n\
         **Order #ORD-2024-8847** - Wireless Headphones Pro\n\
         • Status: In Transit\n\
         • Carrier: UPS, tracking 1Z999AA10123456784\n\
         • Estimated delivery: within 2 business days\n\n\
         **Order #ORD-2024-8812** - Smart Watch Series 5\n\
         • Status: Delivered\n\
         • Carrier: FedEx, tracking 794644790132\n\
         • Left at the front door\n\n\
         **Order #ORD-2024-8790** - USB-C Charging Hub\n\
         • Status: Processing\n\
         • Ships within 24 hours\n\n\
         Would you like live tracking details for any of these orders?"
    )
}

fn returns(user_name: &str) -> String {
    format!(
        "Hello {user_name}, I can help with returns and exchanges.\n\n\
         **Return policy**\n\
         • 30-day return window from the delivery date\n\
         • Items must be unused and in their original packaging\n\
         • Free return shipping for defective items\n\n\
         **Eligible for return**\n\
         • Order #ORD-2024-8812 - Smart Watch Series 5 (26 days left)\n\
         • Order #ORD-2024-8755 - Bluetooth Speaker (12 days left)\n\n\
         Refunds reach the original payment method 5-7 business days after we receive the item. \
         Shall I generate a prepaid return label for you?"
    )
}

fn products() -> String {
    "Happy to help you find the right product! Here is what is popular right now:\n\n\
     **Laptops**\n\
     • UltraBook Pro 14 - $1,299 (in stock)\n\
     • WorkStation 16 - $1,899 (ships in 3 days)\n\n\
     **Phones & Tablets**\n\
     • Galaxy S24 - $799 (in stock)\n\
     • iPad Air - $599 (in stock)\n\n\
     **Audio**\n\
     • Wireless Headphones Pro - $249 (4.8 stars, 2,341 reviews)\n\
     • Sony WH-1000XM5 - $349 (in stock)\n\n\
     Tell me your budget and what you will use it for and I can narrow it down."
        .to_string()
}

fn billing(user_name: &str) -> String {
    format!(
        "Hi {user_name}, here is a summary of your billing account:\n\n\
         **Payment methods**\n\
         • Visa ending in 4242 (default, expires 08/27)\n\
         • PayPal (linked)\n\n\
         **Recent charges**\n\
         • Mar 12 - $249.00 - Order #ORD-2024-8847 (Paid)\n\
         • Mar 03 - $329.99 - Order #ORD-2024-8812 (Paid)\n\
         • Feb 21 - $49.99 - Order #ORD-2024-8790 (Pending)\n\n\
         **Account balance:** $0.00\n\n\
         If you see a charge you do not recognize, tell me the date and amount and I will open a billing review."
    )
}

fn technical() -> String {
    "Let's get this sorted out. A few steps that fix most issues:\n\n\
     **Login problems**\n\
     • Use \"Forgot password\" on the sign-in page to reset your password\n\
     • Clear your browser cache and cookies, then try again\n\
     • Check that two-factor codes come from the right authenticator entry\n\n\
     **App issues**\n\
     • Update to the latest version (4.12.0)\n\
     • Force close and reopen the app\n\
     • Reinstall if the problem continues\n\n\
     **System status:** all services operational\n\n\
     If none of this helps, send me the exact error message and your device model."
        .to_string()
}

fn greeting(user_name: &str) -> String {
    format!(
        "Hello {user_name}! Welcome to customer support. I can help you with:\n\n\
         • **Orders** - status, tracking and delivery\n\
         • **Returns** - returns, exchanges and refunds\n\
         • **Products** - specs, availability and recommendations\n\
         • **Billing** - payments, charges and invoices\n\
         • **Technical** - login, app and account issues\n\n\
         What can I do for you today?"
    )
}

fn gratitude(user_name: &str) -> String {
    format!(
        "You're very welcome, {user_name}! I'm glad I could help.\n\n\
         Is there anything else I can do for you? If not, have a wonderful day! \
         You can reach us here any time, your ticket stays open for 7 days."
    )
}

fn fallback() -> String {
    "Thanks for reaching out! I want to make sure you get to the right team. \
     Could you tell me a bit more? I can help with:\n\n\
     • **Order status** and tracking\n\
     • **Returns** and exchanges\n\
     • **Product** information\n\
     • **Billing** questions\n\
     • **Technical** support\n\n\
     You can also use the quick actions below the chat."
        .to_string()
}
