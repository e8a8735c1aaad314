use leptos::prelude::*;

#[component]
pub fn ConclusionsPage() -> impl IntoView {
    view! {
        <section class="page">
            <h2>"Conclusion"</h2>
            <p>
                "Based on the analysis, the hypothesis that the choice of weapon depends on the \
                 average statistical number of victims was refuted. The null hypothesis, which \
                 asserts the independence of these variables, could not be rejected. This means \
                 that the frequency of choosing a weapon does not depend on the number of victims \
                 in terrorist attacks. Therefore, the choice of weapon is most likely determined \
                 by other factors that require additional research."
            </p>
            <div class="callout success">
                "Thank you for using our application! We hope you found it helpful."
            </div>
        </section>
    }
}
