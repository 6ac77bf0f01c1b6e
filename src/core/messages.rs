//! User facing texts.
//!
//! Two fixed prompt sets are shipped; the active one is picked by configuration.

use crate::core::plan::PlanLength;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Arabic,
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ar" | "arabic" => Ok(Language::Arabic),
            _ => Err(()),
        }
    }
}

impl Language {
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::English => &ENGLISH,
            Language::Arabic => &ARABIC,
        }
    }
}

pub struct Messages {
    pub title: &'static str,
    pub add_button: &'static str,
    pub view_button: &'static str,
    pub edit_button: &'static str,
    pub delete_button: &'static str,
    pub ask_name: &'static str,
    pub ask_service: &'static str,
    pub ask_duration: &'static str,
    pub ask_new_name: &'static str,
    pub ask_new_service: &'static str,
    pub ask_new_duration: &'static str,
    pub added: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub ends: &'static str,
    pub empty_list: &'static str,
    pub pick_duration: &'static str,
    pub use_menu: &'static str,
    pub denied: &'static str,
    pub invalid_choice: &'static str,
    pub nothing_pending: &'static str,
    pub not_found: &'static str,
    pub failure: &'static str,
    pub no_name: &'static str,
    durations: [&'static str; 4],
    reminder: fn(&str, &str) -> String,
}

impl Messages {
    pub fn duration_label(&self, length: PlanLength) -> &'static str {
        match length {
            PlanLength::OneMonth => self.durations[0],
            PlanLength::ThreeMonths => self.durations[1],
            PlanLength::SixMonths => self.durations[2],
            PlanLength::Year => self.durations[3],
        }
    }

    pub fn reminder(&self, name: &str, service: &str) -> String {
        (self.reminder)(name, service)
    }
}

static ENGLISH: Messages = Messages {
    title: "📦 Subscription Manager",
    add_button: "➕ Add",
    view_button: "📋 View",
    edit_button: "✏️ Edit",
    delete_button: "🗑 Delete",
    ask_name: "Customer name?",
    ask_service: "Service name?",
    ask_duration: "Duration?",
    ask_new_name: "New customer name? Send - to keep the current one.",
    ask_new_service: "New service name? Send - to keep the current one.",
    ask_new_duration: "New duration? It is counted from today.",
    added: "✅ Added",
    updated: "✅ Updated",
    deleted: "🗑 Deleted",
    ends: "⏳ Ends",
    empty_list: "No subscriptions yet",
    pick_duration: "Please pick a duration from the buttons above.",
    use_menu: "Send /start to open the menu.",
    denied: "❌ This bot is private",
    invalid_choice: "⚠️ Unknown option, nothing was changed.",
    nothing_pending: "⚠️ This action has expired, start again from the menu.",
    not_found: "⚠️ That subscription no longer exists, nothing was changed.",
    failure: "⚠️ Something went wrong, nothing was changed. Please try again.",
    no_name: "-",
    durations: ["1 month", "3 months", "6 months", "1 year"],
    reminder: english_reminder,
};

static ARABIC: Messages = Messages {
    title: "📦 مدير الاشتراكات",
    add_button: "➕ إضافة",
    view_button: "📋 عرض",
    edit_button: "✏️ تعديل",
    delete_button: "🗑 حذف",
    ask_name: "اسم الزبون؟",
    ask_service: "اسم الخدمة؟",
    ask_duration: "المدة؟",
    ask_new_name: "اسم الزبون الجديد؟ أرسل - للإبقاء على الحالي.",
    ask_new_service: "اسم الخدمة الجديد؟ أرسل - للإبقاء على الحالي.",
    ask_new_duration: "المدة الجديدة؟ تحسب من اليوم.",
    added: "✅ تم الإضافة",
    updated: "✅ تم التعديل",
    deleted: "🗑 تم الحذف",
    ends: "⏳ ينتهي",
    empty_list: "لا يوجد اشتراكات",
    pick_duration: "اختر المدة من الأزرار أعلاه.",
    use_menu: "أرسل /start لفتح القائمة.",
    denied: "❌ هذا البوت خاص",
    invalid_choice: "⚠️ خيار غير معروف، لم يتم تغيير شيء.",
    nothing_pending: "⚠️ انتهت صلاحية هذا الإجراء، ابدأ من القائمة.",
    not_found: "⚠️ هذا الاشتراك غير موجود، لم يتم تغيير شيء.",
    failure: "⚠️ حدث خطأ، لم يتم تغيير شيء. حاول مرة أخرى.",
    no_name: "-",
    durations: ["1 شهر", "3 أشهر", "6 أشهر", "سنة"],
    reminder: arabic_reminder,
};

fn english_reminder(name: &str, service: &str) -> String {
    format!("🔔 Reminder: the subscription of {name} ({service}) ends in two days")
}

fn arabic_reminder(name: &str, service: &str) -> String {
    format!("🔔 تذكير: اشتراك {name} ({service}) ينتهي بعد يومين")
}
