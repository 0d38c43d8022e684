//! Summary cards for the headline numbers at the top of the dashboards.

use maud::{Markup, html};

/// How a card's value should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardTone {
    Neutral,
    Positive,
    Negative,
}

impl CardTone {
    /// Positive for amounts above zero, negative below zero.
    pub(crate) fn for_amount(amount: f64) -> Self {
        if amount > 0.0 {
            CardTone::Positive
        } else if amount < 0.0 {
            CardTone::Negative
        } else {
            CardTone::Neutral
        }
    }

    fn style(self) -> &'static str {
        match self {
            CardTone::Neutral => "text-gray-900 dark:text-white",
            CardTone::Positive => "text-green-600 dark:text-green-400",
            CardTone::Negative => "text-red-600 dark:text-red-400",
        }
    }
}

/// A labelled number shown in a card.
pub(crate) struct SummaryCard<'a> {
    pub title: &'a str,
    pub value: String,
    pub tone: CardTone,
}

pub(crate) fn summary_cards_view(cards: &[SummaryCard<'_>]) -> Markup {
    html! {
        section class="w-full mx-auto mb-8"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                @for card in cards {
                    div
                        class="bg-white dark:bg-gray-800 border border-gray-200
                            dark:border-gray-700 rounded-lg p-4 shadow-md"
                        aria-label=(format!("{}: {}", card.title, card.value))
                    {
                        h3 class="text-sm font-medium text-gray-600 dark:text-gray-400"
                        {
                            (card.title)
                        }

                        p class={"mt-2 text-2xl font-bold " (card.tone.style())}
                        {
                            (card.value)
                        }
                    }
                }
            }
        }
    }
}
