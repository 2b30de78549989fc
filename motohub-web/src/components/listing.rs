//! Listing card components

use motohub_search::ListingCard;

use super::escape_html;

/// Renders the small site badge shown over the listing image.
///
/// GooBike listings get a red badge, every other source an orange one.
pub fn source_badge(source_id: &str, source: &str) -> String {
    let color = if source_id == "goobike" {
        "bg-red-600"
    } else {
        "bg-orange-500"
    };

    format!(
        r#"<div class="h-5 px-1.5 rounded {color} flex items-center justify-center text-[8px] text-white font-black uppercase shadow-md">{}</div>"#,
        escape_html(source)
    )
}

fn listing_image(card: &ListingCard) -> String {
    match card.images.first() {
        Some(url) => format!(
            r#"<img src="{}" class="bike-img w-full h-full object-cover" alt="{}" loading="lazy">"#,
            escape_html(url),
            escape_html(&card.name)
        ),
        None => r#"<div class="w-full h-full flex items-center justify-center text-gray-200">
                <i data-lucide="image" class="w-12 h-12"></i>
            </div>"#
            .to_string(),
    }
}

/// Renders one listing as a result card.
pub fn listing_card(card: &ListingCard) -> String {
    format!(
        r#"<div class="bike-card flex flex-col bg-white rounded-2xl overflow-hidden shadow-sm" data-listing-id="{id}">
            <div class="aspect-[4/3] bg-gray-50 relative overflow-hidden">
                <div class="absolute top-3 left-3 z-10">{badge}</div>
                {image}
            </div>
            <div class="p-4 flex flex-col flex-grow">
                <p class="text-[10px] font-bold text-gray-400 mb-0.5">{maker}</p>
                <h3 class="text-sm font-bold text-black leading-tight line-clamp-2 mb-3">{name}</h3>
                <div class="flex flex-wrap gap-x-3 gap-y-1 mb-4 text-[11px] text-gray-500">
                    <span class="flex items-center gap-1"><i data-lucide="calendar" class="w-3 h-3"></i>{year}</span>
                    <span class="flex items-center gap-1"><i data-lucide="gauge" class="w-3 h-3"></i>{mileage}</span>
                    <span class="flex items-center gap-1"><i data-lucide="zap" class="w-3 h-3"></i>{displacement}</span>
                </div>
                <div class="bg-gray-50 p-3 rounded-xl mb-4">
                    <div class="flex justify-between items-baseline">
                        <span class="text-[10px] font-bold text-gray-400 uppercase">Total</span>
                        <div class="text-black">
                            <span class="text-xl font-black italic">{total_price}</span>
                            <span class="text-[10px] font-bold ml-0.5">万円</span>
                        </div>
                    </div>
                </div>
                <div class="mt-auto pt-4 border-t border-gray-50">
                    <p class="text-[11px] font-bold text-gray-700 mb-1 line-clamp-1">{store_name}</p>
                    <div class="flex justify-between items-center mt-2">
                        <span class="text-[9px] font-black text-gray-300 uppercase italic">Source: {source}</span>
                        <a href="{url}" target="_blank" rel="noopener" class="text-[10px] font-bold text-gray-500 hover:text-black flex items-center gap-1">詳細を見る <i data-lucide="external-link" class="w-3 h-3"></i></a>
                    </div>
                </div>
            </div>
        </div>"#,
        id = card.id,
        badge = source_badge(&card.source_id, &card.source),
        image = listing_image(card),
        maker = escape_html(&card.maker),
        name = escape_html(&card.name),
        year = escape_html(&card.year),
        mileage = escape_html(&card.mileage),
        displacement = escape_html(&card.displacement),
        total_price = escape_html(&card.total_price),
        store_name = escape_html(&card.store_name),
        source = escape_html(&card.source),
        url = escape_html(&card.url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ListingCard {
        ListingCard {
            id: 7,
            source_id: "bds".to_string(),
            source: "BDS".to_string(),
            maker: "ホンダ".to_string(),
            name: "Rebel 250 <ABS>".to_string(),
            year: "2023年".to_string(),
            mileage: "1,200km".to_string(),
            displacement: "250cc".to_string(),
            total_price: "59.8".to_string(),
            base_price: "54.8".to_string(),
            store_name: "個人出品等".to_string(),
            store_address: String::new(),
            url: "https://example.com/listings/7?a=1&b=2".to_string(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_badge_color_by_source() {
        assert!(source_badge("goobike", "GooBike").contains("bg-red-600"));
        assert!(source_badge("bds", "BDS").contains("bg-orange-500"));
    }

    #[test]
    fn test_card_renders_escaped_fields() {
        let html = listing_card(&card());

        assert!(html.contains("Rebel 250 &lt;ABS&gt;"));
        assert!(html.contains(r#"href="https://example.com/listings/7?a=1&amp;b=2""#));
        assert!(html.contains("59.8"));
        assert!(html.contains("個人出品等"));
        assert!(html.contains(r#"data-lucide="image""#));
    }

    #[test]
    fn test_card_uses_first_image() {
        let mut card = card();
        card.images = vec!["first.jpg".to_string(), "second.jpg".to_string()];

        let html = listing_card(&card);
        assert!(html.contains(r#"src="first.jpg""#));
        assert!(!html.contains("second.jpg"));
    }
}
