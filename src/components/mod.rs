//! UI Components
//!
//! Leptos components. Every component that reads or mutates data takes
//! the `DataContext` as a prop.

mod title_bar;
mod delete_confirm_button;
mod medication_card;
mod medication_form;
mod alarm_alert;
mod history_list;
mod settings_view;

pub use title_bar::TitleBar;
pub use delete_confirm_button::DeleteConfirmButton;
pub use medication_card::MedicationCard;
pub use medication_form::MedicationForm;
pub use alarm_alert::AlarmAlert;
pub use history_list::HistoryList;
pub use settings_view::SettingsView;
