use actix_web::{HttpResponse, web};

use glimpse_core::domain::{Lead, LeadFilter};
use glimpse_shared::dto::{LeadQuery, LeadRead};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn lead_filter(query: LeadQuery) -> LeadFilter {
    LeadFilter {
        id: query.id,
        name: query.name,
        source: query.source,
        interest_level: query.interest_level,
        status: query.status,
        salesperson: query.salesperson,
    }
}

fn lead_read(lead: Lead) -> LeadRead {
    LeadRead {
        id: lead.id,
        lead_name: lead.lead_name,
        email: lead.email,
        source: lead.source,
        interest_level: lead.interest_level,
        status: lead.status,
        salesperson: lead.salesperson,
    }
}

/// GET /leads/
///
/// `id` wins over every other filter.
pub async fn list_leads(
    state: web::Data<AppState>,
    query: web::Query<LeadQuery>,
) -> AppResult<HttpResponse> {
    let filter = lead_filter(query.into_inner());
    let leads = state.leads.find(filter).await?;

    Ok(HttpResponse::Ok().json(leads.into_iter().map(lead_read).collect::<Vec<_>>()))
}
