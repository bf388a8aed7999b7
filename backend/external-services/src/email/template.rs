use common_utils::date_time;
use domain_types::api::ReceiptDetails;
use html_escape::encode_text;
use time::OffsetDateTime;

/// HTML body of a donation receipt.
pub fn render_receipt(receipt: &ReceiptDetails, issued_on: OffsetDateTime) -> String {
    let firstname = encode_text(&receipt.firstname);
    let major_amount = receipt.amount.to_major_unit_as_string();
    let amount = encode_text(major_amount.get_amount_as_string());
    let txnid = encode_text(receipt.txnid.get_string_repr());
    let payu_money_id = encode_text(&receipt.payu_money_id);
    let date = date_time::format_receipt_date(issued_on);

    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #333333;">
    <h2>Thank you, {firstname}!</h2>
    <p>Your donation helps us rescue, feed and rehome dogs in need.</p>
    <table cellpadding="6" style="border-collapse: collapse;">
      <tr><td><strong>Amount</strong></td><td>&#8377;{amount}</td></tr>
      <tr><td><strong>Transaction ID</strong></td><td>{txnid}</td></tr>
      <tr><td><strong>Payment reference</strong></td><td>{payu_money_id}</td></tr>
      <tr><td><strong>Date</strong></td><td>{date}</td></tr>
    </table>
    <p>Please keep this email as the receipt for your donation.</p>
  </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use common_utils::{id_type::TransactionId, types::MinorUnit};
    use time::macros::datetime;

    use super::*;

    fn receipt(firstname: &str) -> ReceiptDetails {
        ReceiptDetails {
            email: "asha@example.com".to_string(),
            firstname: firstname.to_string(),
            amount: MinorUnit::new(150_050),
            txnid: TransactionId::new_unchecked("DN1760745600000AbCdEfGhIj"),
            payu_money_id: "403993715531".to_string(),
        }
    }

    #[test]
    fn receipt_lists_donation_details() {
        let html = render_receipt(&receipt("Asha"), datetime!(2026-10-18 10:00 UTC));
        assert!(html.contains("Thank you, Asha!"));
        assert!(html.contains("&#8377;1500.50"));
        assert!(html.contains("DN1760745600000AbCdEfGhIj"));
        assert!(html.contains("403993715531"));
        assert!(html.contains("18 October 2026"));
    }

    #[test]
    fn donor_name_is_escaped() {
        let html = render_receipt(&receipt("<b>Asha</b>"), datetime!(2026-10-18 10:00 UTC));
        assert!(html.contains("&lt;b&gt;Asha&lt;/b&gt;"));
        assert!(!html.contains("<b>Asha</b>"));

        let html = render_receipt(&receipt("Asha & Ravi"), datetime!(2026-10-18 10:00 UTC));
        assert!(html.contains("Thank you, Asha &amp; Ravi!"));
    }
}
