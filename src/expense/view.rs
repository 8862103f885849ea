//! HTML rendering for the expenses page.

use maud::{Markup, html};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    CategoryName,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
};

use super::{core::Expense, expenses_page::ALL_CATEGORIES, query::SortMode};

/// The max number of graphemes to display in the item column before
/// truncating and displaying ellipses.
const MAX_ITEM_GRAPHEMES: usize = 48;

pub(crate) fn expenses_view(
    expenses: &[Expense],
    total: f64,
    categories: &[CategoryName],
    selected_category: Option<&CategoryName>,
    selected_sort: SortMode,
    today: Date,
) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-3xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }
                }

                (add_expense_form(categories, today))
                (filter_controls(categories, selected_category, selected_sort))
                (expenses_table(expenses, total))
            }
        }
    };

    base("Expenses", &content)
}

fn add_expense_form(categories: &[CategoryName], today: Date) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::ADD_EXPENSE)
            class="space-y-2 rounded bg-white dark:bg-gray-800 p-4"
        {
            div
            {
                label for="item" class=(FORM_LABEL_STYLE) { "Item" }
                input
                    type="text"
                    name="item"
                    id="item"
                    placeholder="Flat white"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="0.01"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    type="text"
                    name="category"
                    id="category"
                    list="category-options"
                    class=(FORM_TEXT_INPUT_STYLE);

                datalist id="category-options"
                {
                    @for category in categories
                    {
                        option value=(category) {}
                    }
                }

                // Wired up by app.js to the predict endpoint.
                button
                    type="button"
                    id="suggest-category"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Suggest a category"
                }

                span
                    id="category-suggestion"
                    class="text-sm text-gray-500 dark:text-gray-400"
                {}
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

fn filter_controls(
    categories: &[CategoryName],
    selected_category: Option<&CategoryName>,
    selected_sort: SortMode,
) -> Markup {
    let sort_options = [
        (SortMode::Newest, "Newest first"),
        (SortMode::HighestAmount, "Highest amount"),
        (SortMode::LowestAmount, "Lowest amount"),
    ];

    html! {
        form
            method="get"
            action=(endpoints::ROOT)
            class="flex gap-2 items-end rounded bg-white dark:bg-gray-800 p-4"
        {
            div
            {
                label for="category-filter" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category-filter" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(ALL_CATEGORIES) selected[selected_category.is_none()]
                    {
                        (ALL_CATEGORIES)
                    }

                    @for category in categories
                    {
                        option value=(category) selected[selected_category == Some(category)]
                        {
                            (category)
                        }
                    }
                }
            }

            div
            {
                label for="sort" class=(FORM_LABEL_STYLE) { "Sort" }
                select name="sort" id="sort" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (mode, label) in sort_options
                    {
                        option value=(mode.as_query_value()) selected[mode == selected_sort]
                        {
                            (label)
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply" }
        }
    }
}

fn expenses_table(expenses: &[Expense], total: f64) -> Markup {
    html! {
        section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Item" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) {}
                    }
                }

                tbody
                {
                    @if expenses.is_empty()
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) colspan="5" { "No expenses recorded yet." }
                        }
                    }

                    @for expense in expenses
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (truncate_item(&expense.item)) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                            td class=(TABLE_CELL_STYLE) { (expense.category) }
                            td class=(TABLE_CELL_STYLE) { (expense.date) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href=(format_endpoint(endpoints::DELETE_EXPENSE, expense.id))
                                    class=(BUTTON_DELETE_STYLE)
                                {
                                    "Delete"
                                }
                            }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        td class=(TABLE_CELL_STYLE) { "Total" }
                        td class=(TABLE_CELL_STYLE) id="expenses-total" { (format_currency(total)) }
                        td class=(TABLE_CELL_STYLE) colspan="3" {}
                    }
                }
            }
        }
    }
}

fn truncate_item(item: &str) -> String {
    let graphemes: Vec<&str> = item.graphemes(true).collect();

    if graphemes.len() <= MAX_ITEM_GRAPHEMES {
        item.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_ITEM_GRAPHEMES].concat())
    }
}
