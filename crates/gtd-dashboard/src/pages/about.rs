use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="page">
            <h2>"About the Project"</h2>
            <p>
                "This application analyzes global terrorism activity data. It explores trends, key \
                 patterns, and hypotheses related to weapon choices and casualty counts."
            </p>
            <p><strong>"Analysis Stages:"</strong></p>
            <ol>
                <li>"Data cleaning and preprocessing"</li>
                <li>"Exploratory Data Analysis (EDA)"</li>
                <li>"Visualizing key trends and patterns"</li>
                <li>"Hypothesis testing on weapon choices"</li>
            </ol>
        </section>
    }
}
