pub const TEST_IPN_VALUES: &[&str] = &["1"];

pub const RESEND_VALUES: &[&str] = &["true", "false"];

literal_set! {
    pub enum AddressStatus {
        Confirmed => "confirmed",
        Unconfirmed => "unconfirmed",
    }
}

literal_set! {
    /// How the payment was funded.
    pub enum PaymentType {
        Echeck => "echeck",
        Instant => "instant",
    }
}

literal_set! {
    pub enum PayerStatus {
        Verified => "verified",
        Unverified => "unverified",
    }
}

literal_set! {
    /// Seller protection eligibility of the transaction.
    pub enum ProtectionEligibility {
        Eligible => "Eligible",
        Ineligible => "Ineligible",
        PartiallyEligibleInrOnly => "Partially Eligible - INR Only",
        PartiallyEligibleUnauthOnly => "Partially Eligible - Unauth Only",
        PartiallyEligible => "PartiallyEligible",
        NoProtection => "None",
        ActiveFraudControlUnauthPremium => "Active Fraud Control - Unauth Premium Eligible",
    }
}

literal_set! {
    pub enum PaymentStatus {
        /// A reversal was canceled and the funds returned to the merchant.
        CanceledReversal => "Canceled_Reversal",
        Completed => "Completed",
        /// German ELV payment made through Express Checkout.
        Created => "Created",
        Denied => "Denied",
        /// Authorization expired before capture.
        Expired => "Expired",
        Failed => "Failed",
        Pending => "Pending",
        Refunded => "Refunded",
        Reversed => "Reversed",
        Processed => "Processed",
        /// Authorization voided.
        Voided => "Voided",
    }
}

impl PaymentStatus {
    /// `pending_reason` is documented for this status.
    pub fn expects_pending_reason(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }

    /// `reason_code` is documented for this status.
    pub fn expects_reason_code(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Reversed
                | PaymentStatus::Refunded
                | PaymentStatus::CanceledReversal
                | PaymentStatus::Denied
        )
    }
}

literal_set! {
    pub enum PendingReason {
        Address => "address",
        Authorization => "authorization",
        DelayedDisbursement => "delayed_disbursement",
        Echeck => "echeck",
        International => "intl",
        MultiCurrency => "multi_currency",
        Order => "order",
        PaymentReview => "paymentreview",
        RegulatoryReview => "regulatory_review",
        Unilateral => "unilateral",
        Upgrade => "upgrade",
        Verify => "verify",
        Other => "other",
    }
}

literal_set! {
    open
    /// Reason for a reversal, refund, canceled reversal or denial.
    ///
    /// PayPal sends codes that are missing from its own documentation, so
    /// unknown values are kept rather than rejected.
    pub enum ReasonCode {
        AdjustmentReversal => "adjustment_reversal",
        AdminFraudReversal => "admin_fraud_reversal",
        AdminReversal => "admin_reversal",
        BuyerComplaint => "buyer-complaint",
        Chargeback => "chargeback",
        ChargebackReimbursement => "chargeback_reimbursement",
        ChargebackSettlement => "chargeback_settlement",
        Guarantee => "guarantee",
        Unspecified => "other",
        Refund => "refund",
        RegulatoryBlock => "regulatory_block",
        RegulatoryReject => "regulatory_reject",
        UnauthorizedClaim => "unauthorized_claim",
        UnauthorizedSpoof => "unauthorized_spoof",
        RegulatoryReviewExceedingSla => "regulatory_review_exceeding_sla",
    }
}

literal_set! {
    /// Fraud Management Filter that held the payment, by filter ID.
    pub enum FraudFilter {
        AvsNoMatch => "1",
        AvsPartialMatch => "2",
        AvsUnavailable => "3",
        CscMismatch => "4",
        MaximumTransactionAmount => "5",
        UnconfirmedAddress => "6",
        CountryMonitor => "7",
        LargeOrderNumber => "8",
        BillingShippingMismatch => "9",
        RiskyZipCode => "10",
        SuspectedFreightForwarder => "11",
        TotalPurchasePriceMinimum => "12",
        IpAddressVelocity => "13",
        RiskyEmailDomain => "14",
        RiskyBankIdentificationNumber => "15",
        RiskyIpAddressRange => "16",
        PayPalFraudModel => "17",
    }
}

literal_set! {
    /// Billing agreement status; `I` means canceled.
    pub enum AgreementStatus {
        Active => "A",
        Inactive => "I",
    }
}

literal_set! {
    pub enum AgreementPayType {
        Instant => "INSTANT",
        Any => "ANY",
        Echeck => "ECHECK",
    }
}
