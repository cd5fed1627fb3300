//! Home page route handler.
//!
//! Every block on the landing page is static content; the only dynamic value
//! is the configured course price.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use course_shop_core::Taka;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Price the course is advertised as discounted from.
const LIST_PRICE_TAKA: i64 = 5000;

/// A course feature card.
#[derive(Clone)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// A student testimonial.
#[derive(Clone)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
    pub avatar: &'static str,
    pub rating: u8,
}

/// A frequently asked question.
#[derive(Clone)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

const HERO_HIGHLIGHTS: &[&str] = &[
    "১০ দিনে মনিটাইজেশন",
    "লক্ষ লক্ষ ভিউ গ্যারান্টি",
    "২৪/৭ সাপোর্ট",
    "লাইফটাইম এক্সেস",
];

const PRICING_INCLUDES: &[&str] = &[
    "১০ দিনে মনিটাইজেশন গ্যারান্টি",
    "ভিডিও ভিউ বৃদ্ধির Apps",
    "সব নিয়ম ও সমাধান",
    "লাইফটাইম সাপোর্ট",
    "১০০% মানি-ব্যাক গ্যারান্টি",
];

const FEATURES: &[Feature] = &[
    Feature {
        title: "১০ দিনে মনিটাইজেশন গ্যারান্টি",
        description: "নতুন পুরাতন সব আইডি ও পেজের জন্য ১০০% গ্যারান্টিসহ কন্টেন্ট মনিটাইজেশন।",
    },
    Feature {
        title: "ভিডিও ভিউ বাড়ানোর Apps",
        description: "আপনার ভিডিও লক্ষ লক্ষ মানুষের কাছে পৌঁছে দেওয়ার জন্য বিশেষ Apps পাবেন।",
    },
    Feature {
        title: "তাৎক্ষণিক ভিউ জেনারেশন",
        description: "পুরাতন পেজের ভিডিও প্রথম দিন থেকেই প্রচুর ভিউ জেনারেট করবে।",
    },
    Feature {
        title: "Facebook এর সকল নিয়ম",
        description: "আপনার পেজ বা আইডির কখনো সমস্যা হবে না, সব নিয়ম শিখুন।",
    },
    Feature {
        title: "সমস্যা চেক ও সমাধান",
        description: "নিজেই আপনার পেজের সমস্যা চেক করুন এবং সমাধান করুন।",
    },
    Feature {
        title: "A to Z নতুন পেজ খোলা",
        description: "শূন্য থেকে নতুন পেজ খোলা এবং সেটআপ করার সম্পূর্ণ গাইড।",
    },
    Feature {
        title: "ডলার ব্যাংকে আনার পদ্ধতি",
        description: "Facebook থেকে আয় করা ডলার কিভাবে ব্যাংকে নিয়ে আসবেন তার সম্পূর্ণ প্রক্রিয়া।",
    },
    Feature {
        title: "সম্পূর্ণ বাংলা কোর্স",
        description: "সবকিছু সহজ বাংলা ভাষায় বুঝিয়ে দেওয়া হয়েছে।",
    },
];

const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "রহিম আহমেদ",
        role: "ইউটিউবার",
        quote: "মাত্র ৭ দিনেই আমার পেজ মনিটাইজ হয়ে গেছে! অসাধারণ কোর্স।",
        avatar: "👨‍💼",
        rating: 5,
    },
    Testimonial {
        name: "ফাতেমা খাতুন",
        role: "কন্টেন্ট ক্রিয়েটর",
        quote: "এই কোর্সের পর আমার ভিডিওতে লক্ষ লক্ষ ভিউ আসছে।",
        avatar: "👩‍💻",
        rating: 5,
    },
    Testimonial {
        name: "করিম উদ্দিন",
        role: "ডিজিটাল মার্কেটার",
        quote: "Facebook থেকে এখন মাসে ৫০,০০০ টাকা আয় করছি।",
        avatar: "👨‍🎓",
        rating: 5,
    },
    Testimonial {
        name: "সালমা বেগম",
        role: "হাউজওয়াইফ",
        quote: "ঘর থেকে বসে এখন ভালো একটা আয় হচ্ছে। ধন্যবাদ!",
        avatar: "👩‍🦳",
        rating: 5,
    },
    Testimonial {
        name: "নাসির হোসেন",
        role: "স্টুডেন্ট",
        quote: "পড়াশোনার পাশাপাশি মাসিক ৩০,০০০ টাকা আয় করছি।",
        avatar: "👨‍🎓",
        rating: 5,
    },
    Testimonial {
        name: "রুমা আক্তার",
        role: "গৃহিণী",
        quote: "স্বামীর আয়ের চেয়ে বেশি আয় করছি Facebook থেকে।",
        avatar: "👩‍💼",
        rating: 5,
    },
];

const FAQS: &[Faq] = &[
    Faq {
        question: "সত্যিই কি ১০ দিনে মনিটাইজেশন সম্ভব?",
        answer: "হ্যাঁ, আমাদের প্রমাণিত পদ্ধতি অনুসরণ করলে ১০ দিনের মধ্যেই মনিটাইজেশন পাবেন। আমরা ১০০% গ্যারান্টি দিচ্ছি। আমাদের হাজার হাজার শিক্ষার্থী ইতিমধ্যে এই পদ্ধতিতে সফল হয়েছেন।",
    },
    Faq {
        question: "নতুন পেজেও কি কাজ করবে?",
        answer: "অবশ্যই! আমাদের কোর্স নতুন এবং পুরাতন উভয় ধরনের পেজ ও আইডির জন্য কার্যকর। নতুন পেজের জন্য বিশেষ কৌশল এবং পুরাতন পেজের জন্য আলাদা পদ্ধতি শেখানো হয়েছে।",
    },
    Faq {
        question: "কোর্স কতদিনের জন্য এক্সেস পাবো?",
        answer: "আপনি লাইফটাইম এক্সেস পাবেন এবং সাথে থাকবে ফ্রি আপডেট ও সাপোর্ট। Facebook এর নতুন আপডেট অনুযায়ী কোর্স আপডেট করা হয় এবং সেগুলো আপনি ফ্রিতে পাবেন।",
    },
    Faq {
        question: "টাকা ফেরত পলিসি আছে কি?",
        answer: "হ্যাঁ, যদি ১০ দিনে মনিটাইজেশন না হয়, আমরা ১০০% টাকা ফেরত দিবো। কোন প্রশ্ন করা হবে না। আমরা আমাদের কোর্সের মান নিয়ে সম্পূর্ণ আত্মবিশ্বাসী।",
    },
    Faq {
        question: "ভিডিও ভিউ বাড়ানোর Apps কিভাবে কাজ করে?",
        answer: "আমাদের বিশেষ Apps আপনার ভিডিওকে অর্গানিক উপায়ে লক্ষ লক্ষ মানুষের কাছে পৌঁছে দেয়। এটি Facebook এর নিয়ম মেনেই কাজ করে এবং আপনার পেজের কোনো ক্ষতি হয় না।",
    },
    Faq {
        question: "কোর্সটি কি বাংলায়?",
        answer: "হ্যাঁ, সম্পূর্ণ কোর্স সহজ বাংলা ভাষায় তৈরি। প্রতিটি ধাপ বিস্তারিতভাবে বাংলায় ব্যাখ্যা করা হয়েছে। স্ক্রিনশট এবং ভিডিও টিউটোরিয়াল সহ সবকিছু বাংলায় পাবেন।",
    },
    Faq {
        question: "সাপোর্ট কিভাবে পাবো?",
        answer: "২৪/৭ সাপোর্ট পাবেন। ফেসবুক গ্রুপে, WhatsApp এ এবং ইমেইলে যেকোনো সমস্যার সমাধান পাবেন।",
    },
    Faq {
        question: "Facebook এর নীতিমালা লঙ্ঘন হওয়ার সম্ভাবনা আছে কি?",
        answer: "একদমই না। আমাদের সব পদ্ধতি Facebook এর নীতিমালা অনুযায়ী তৈরি। আমরা শুধুমাত্র অর্গানিক এবং নিরাপদ পদ্ধতি শেখাই যাতে আপনার পেজ বা আইডির কোনো সমস্যা না হয়।",
    },
    Faq {
        question: "কোর্স করার পর আয় কত হতে পারে?",
        answer: "এটি নির্ভর করে আপনার কাজের উপর। তবে আমাদের শিক্ষার্থীরা মাসে ২০,০০০ থেকে ১,০০,০০০ টাকা পর্যন্ত আয় করছেন। নিয়মিত কাজ করলে ভালো আয় সম্ভব।",
    },
];

/// Prices as shown in the hero, pricing and call-to-action blocks.
#[derive(Clone)]
pub struct PriceView {
    /// Current price in Bengali, e.g. "৩,০০০ টাকা".
    pub price: String,
    /// Struck-through list price.
    pub list_price: String,
    /// Whole-percent discount, absent when the price is not below list.
    pub discount_percent: Option<i64>,
}

impl PriceView {
    /// Build the price block for `price`.
    #[must_use]
    pub fn new(price: Taka) -> Self {
        let list = Taka::from_whole(LIST_PRICE_TAKA);
        let discount_percent = (price < list)
            .then(|| (list.amount() - price.amount()) * Decimal::ONE_HUNDRED / list.amount())
            .and_then(|saved| saved.round().to_i64());

        Self {
            price: price.display_bn(),
            list_price: list.display_bn(),
            discount_percent,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub pricing: PriceView,
    pub highlights: &'static [&'static str],
    pub includes: &'static [&'static str],
    pub features: &'static [Feature],
    pub testimonials: &'static [Testimonial],
    pub faqs: &'static [Faq],
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        pricing: PriceView::new(state.config().course_price),
        highlights: HERO_HIGHLIGHTS,
        includes: PRICING_INCLUDES,
        features: FEATURES,
        testimonials: TESTIMONIALS,
        faqs: FAQS,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_view_discount() {
        let view = PriceView::new(Taka::from_whole(3000));
        assert_eq!(view.price, "৩,০০০ টাকা");
        assert_eq!(view.list_price, "৫,০০০ টাকা");
        assert_eq!(view.discount_percent, Some(40));
    }

    #[test]
    fn test_price_view_without_discount() {
        let view = PriceView::new(Taka::from_whole(5000));
        assert_eq!(view.discount_percent, None);
    }
}
