//! Shared maud layout, styles, and formatting helpers.

use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2.5 px-5 mb-2 \
    text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Spendy" }
                link href="/static/main.css" rel="stylesheet";

                script src="/static/app.js" defer {}
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Expenses"
                    }
                }
            }
        }
    );

    base(title, &content)
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}
