use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::ClientConfig;
use crate::pages::analyzer::AnalyzerPage;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    provide_context(config);

    view! {
        <Router>
            <div class="app-layout">
                <header class="app-header">
                    <h1>"Eco-Scan"</h1>
                    <p class="tagline">"AI-powered waste classification"</p>
                </header>
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=AnalyzerPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
