//! Read-only statistics page: user growth, points distribution, and the
//! verification success rate, each from its own endpoint.

use leptos::prelude::*;

use crate::net::client::Api;

#[component]
pub fn StatsPage() -> impl IntoView {
    let api = expect_context::<Api>();

    let growth = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.fetch_user_growth().await }
        }
    });
    let distribution = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.fetch_points_distribution().await }
        }
    });
    let verification = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.fetch_verification_rate().await }
        }
    });

    view! {
        <section class="stats-page">
            <h1>"Statistics"</h1>
            <div class="stats-page__panels">
                <div class="stats-panel">
                    <h2>"User growth"</h2>
                    <Suspense fallback=move || {
                        view! { <p class="page-status">"Loading..."</p> }
                    }>
                        {move || {
                            growth
                                .get()
                                .map(|result| match result {
                                    Ok(points) if points.is_empty() => {
                                        view! { <p class="page-status">"No data."</p> }.into_any()
                                    }
                                    Ok(points) => {
                                        view! {
                                            <table class="data-table">
                                                <thead>
                                                    <tr>
                                                        <th>"Date"</th>
                                                        <th>"Users"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {points
                                                        .into_iter()
                                                        .map(|point| {
                                                            view! {
                                                                <tr>
                                                                    <td>{point.date}</td>
                                                                    <td>{point.users}</td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </tbody>
                                            </table>
                                        }
                                            .into_any()
                                    }
                                    Err(err) => {
                                        view! { <p class="page-error">{err.to_string()}</p> }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </div>

                <div class="stats-panel">
                    <h2>"Points distribution"</h2>
                    <Suspense fallback=move || {
                        view! { <p class="page-status">"Loading..."</p> }
                    }>
                        {move || {
                            distribution
                                .get()
                                .map(|result| match result {
                                    Ok(buckets) if buckets.is_empty() => {
                                        view! { <p class="page-status">"No data."</p> }.into_any()
                                    }
                                    Ok(buckets) => {
                                        view! {
                                            <table class="data-table">
                                                <thead>
                                                    <tr>
                                                        <th>"Points range"</th>
                                                        <th>"Users"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {buckets
                                                        .into_iter()
                                                        .map(|bucket| {
                                                            view! {
                                                                <tr>
                                                                    <td>{bucket.range}</td>
                                                                    <td>{bucket.count}</td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </tbody>
                                            </table>
                                        }
                                            .into_any()
                                    }
                                    Err(err) => {
                                        view! { <p class="page-error">{err.to_string()}</p> }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </div>

                <div class="stats-panel">
                    <h2>"Verification success rate"</h2>
                    <Suspense fallback=move || {
                        view! { <p class="page-status">"Loading..."</p> }
                    }>
                        {move || {
                            verification
                                .get()
                                .map(|result| match result {
                                    Ok(points) if points.is_empty() => {
                                        view! { <p class="page-status">"No data."</p> }.into_any()
                                    }
                                    Ok(points) => {
                                        view! {
                                            <table class="data-table">
                                                <thead>
                                                    <tr>
                                                        <th>"Date"</th>
                                                        <th>"Success rate"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {points
                                                        .into_iter()
                                                        .map(|point| {
                                                            let rate = format!("{:.1}%", point.rate);
                                                            view! {
                                                                <tr>
                                                                    <td>{point.date}</td>
                                                                    <td>{rate}</td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </tbody>
                                            </table>
                                        }
                                            .into_any()
                                    }
                                    Err(err) => {
                                        view! { <p class="page-error">{err.to_string()}</p> }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </div>
            </div>
        </section>
    }
}
